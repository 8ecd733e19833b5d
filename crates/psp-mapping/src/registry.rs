//! One long-lived mapper per target logic, keyed by wire tag.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use psp_model::{Pattern, PatternKind, Scope, ScopeKind};
use tracing::debug;

use crate::errors::MappingError;
use crate::mapper::{LtlMapper, Mapper, Mapping, MtlMapper, PrismMapper, SegMapper, TbvMapper};
use crate::symbols::Notation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetLogic {
    Sel,
    Ltl,
    Mtl,
    Tbv,
    Prism,
    QuantitativePrism,
}

impl TargetLogic {
    pub const ALL: [TargetLogic; 6] = [
        TargetLogic::Sel,
        TargetLogic::Ltl,
        TargetLogic::Mtl,
        TargetLogic::Tbv,
        TargetLogic::Prism,
        TargetLogic::QuantitativePrism,
    ];

    /// Tag used in requests, e.g. `QuantitativePrism`.
    pub fn key(self) -> &'static str {
        match self {
            TargetLogic::Sel => "SEL",
            TargetLogic::Ltl => "LTL",
            TargetLogic::Mtl => "MTL",
            TargetLogic::Tbv => "TBV",
            TargetLogic::Prism => "Prism",
            TargetLogic::QuantitativePrism => "QuantitativePrism",
        }
    }
}

impl fmt::Display for TargetLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TargetLogic {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetLogic::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| MappingError::UnsupportedTarget(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Symbol set of the LTL and MTL mappers.
    pub notation: Notation,
}

/// What a translation request produces: the structured English rendering
/// always, plus either the formula or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Mapped {
        seg: String,
        mapping: String,
        /// Set when part of the property could not be expressed.
        mapping_error: Option<String>,
    },
    Unsupported {
        seg: String,
        error: String,
    },
}

impl TranslationOutcome {
    pub fn seg(&self) -> &str {
        match self {
            TranslationOutcome::Mapped { seg, .. } | TranslationOutcome::Unsupported { seg, .. } => {
                seg
            }
        }
    }
}

pub struct MapperRegistry {
    mappers: IndexMap<TargetLogic, Box<dyn Mapper>>,
}

impl MapperRegistry {
    pub fn new(options: RegistryOptions) -> Result<Self, MappingError> {
        let mut mappers: IndexMap<TargetLogic, Box<dyn Mapper>> = IndexMap::new();
        mappers.insert(TargetLogic::Sel, Box::new(SegMapper::new()));
        mappers.insert(TargetLogic::Ltl, Box::new(LtlMapper::new(options.notation)));
        mappers.insert(TargetLogic::Mtl, Box::new(MtlMapper::new(options.notation)));
        mappers.insert(TargetLogic::Tbv, Box::new(TbvMapper::new()?));
        mappers.insert(TargetLogic::Prism, Box::new(PrismMapper::new()?));
        mappers.insert(
            TargetLogic::QuantitativePrism,
            Box::new(PrismMapper::quantitative()?),
        );
        Ok(Self { mappers })
    }

    pub fn mapper(&self, target: TargetLogic) -> Result<&dyn Mapper, MappingError> {
        self.mappers
            .get(&target)
            .map(|m| m.as_ref())
            .ok_or_else(|| MappingError::UnsupportedTarget(target.key().to_string()))
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetLogic> + '_ {
        self.mappers.keys().copied()
    }

    pub fn translate(
        &self,
        target: TargetLogic,
        scope: &Scope,
        pattern: &Pattern,
    ) -> Result<TranslationOutcome, MappingError> {
        let mapper = self.mapper(target)?;
        let seg = format!(
            "{}, {}.",
            scope.specification_as_sel(),
            pattern.specification_as_sel()
        );
        let Mapping {
            formula,
            error,
            supported,
        } = mapper.get_mapping(scope, pattern)?;
        debug!(logic = %target, supported, "translation finished");
        Ok(if supported {
            TranslationOutcome::Mapped {
                seg,
                mapping: formula,
                mapping_error: error,
            }
        } else {
            TranslationOutcome::Unsupported {
                seg,
                error: mapper.not_supported_message(),
            }
        })
    }

    /// Supported scopes of every pattern, in catalogue order.
    pub fn matrix(
        &self,
        target: TargetLogic,
    ) -> Result<IndexMap<PatternKind, Vec<ScopeKind>>, MappingError> {
        let mapper = self.mapper(target)?;
        Ok(PatternKind::ALL
            .into_iter()
            .map(|pattern| {
                let scopes = ScopeKind::ALL
                    .into_iter()
                    .filter(|scope| mapper.is_combination_supported(*scope, pattern))
                    .collect();
                (pattern, scopes)
            })
            .collect())
    }
}
