//! Places: a concrete rankable record, a built-in world city dataset,
//! paginated search over places and JSON records, and loading of those records.

pub mod builtin;
pub mod input;
pub mod search;
pub mod types;

pub use builtin::{builtin_places, find_builtin};
pub use input::{load_records, InputError};
pub use search::{search, search_places, Searchable, SortKey};
pub use types::{Hit, Place, SearchPage};
