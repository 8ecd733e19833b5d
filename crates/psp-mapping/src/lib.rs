//! Translation of property specification patterns into temporal logics.
//!
//! A [`psp_model::Scope`] and [`psp_model::Pattern`] are reduced to a
//! target-independent [`Formula`], rendered into [`Element`] tokens with one
//! logic's symbol table, rewritten by that logic's postprocessors and finally
//! linearized. [`MapperRegistry`] bundles one mapper per [`TargetLogic`].

pub mod duration;
pub mod element;
pub mod errors;
pub mod formula;
pub mod mapper;
pub mod postprocess;
pub mod reduction;
pub mod registry;
pub mod render;
pub mod symbols;

pub use element::{error_messages, linearize, Element, OperatorKind};
pub use errors::{MappingError, PostprocessError};
pub use formula::{Bound, Formula};
pub use mapper::{LtlMapper, Mapper, Mapping, MtlMapper, PrismMapper, SegMapper, TbvMapper};
pub use postprocess::{MultipleWhiteSpaceReplacer, Postprocessor, WeakUntilSubstituter};
pub use reduction::{reduce, Timing};
pub use registry::{MapperRegistry, RegistryOptions, TargetLogic, TranslationOutcome};
pub use render::Renderer;
pub use symbols::{IntervalStyle, LanguageDefinitions, Notation, Symbol, TimeLanguageDefinitions};
