pub mod catalog;
pub mod option;
pub mod term;
pub mod term_ref;

pub use catalog::{TermCatalog, TermLookup, TermSource, TermSourceError};
pub use option::TermOption;
pub use term::{GlossaryTerm, TermError};
pub use term_ref::GlossaryTermRef;
