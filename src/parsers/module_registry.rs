//! Module registry: name to canonical module descriptor lookup
//!
//! Built from `go list -m -json all`. A module that is redirected by a
//! `replace` directive is registered under its own path and under the
//! replacement's path, both pointing at the replacement descriptor. The
//! replacement does not carry the `Indirect` flag itself, so it is copied
//! over from the original requirement.

use crate::error::{GoWalkerError, OptionExt, Result};
use crate::models::identifier::Identifier;
use crate::models::module_info::ModuleInfo;
use crate::parsers::go_json::parse_module_infos;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Canonical module descriptors keyed by module path
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleInfo>,
    main_module: String,
}

impl ModuleRegistry {
    /// Parse the output of `go list -m -json all`
    pub fn parse(output: &str) -> Result<Self> {
        Self::from_modules(parse_module_infos(output)?)
    }

    /// Build the registry from module descriptors
    ///
    /// Later descriptors for the same name replace earlier ones. Fails unless
    /// exactly one module is flagged as main.
    pub fn from_modules<I>(modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = ModuleInfo>,
    {
        let mut registry = HashMap::new();

        for module in modules {
            match module.replace.as_deref() {
                Some(replacement) => {
                    let canonical = ModuleInfo {
                        indirect: module.indirect,
                        ..replacement.clone()
                    };
                    registry.insert(canonical.path.clone(), canonical.clone());
                    registry.insert(module.path.clone(), canonical);
                }
                None => {
                    registry.insert(module.path.clone(), module);
                }
            }
        }

        let main_modules: BTreeSet<&str> = registry
            .values()
            .filter(|module| module.main)
            .map(|module| module.path.as_str())
            .collect();

        let main_module = match main_modules.len() {
            0 => return Err(GoWalkerError::NoMainModule),
            1 => main_modules.iter().next().map(|name| name.to_string()).unwrap_or_default(),
            _ => {
                return Err(GoWalkerError::AmbiguousMainModule {
                    names: main_modules.into_iter().map(str::to_string).collect(),
                })
            }
        };

        tracing::debug!(
            "Module registry holds {} names, main module is {}",
            registry.len(),
            main_module
        );

        Ok(Self {
            modules: registry,
            main_module,
        })
    }

    /// Look up the canonical descriptor for a module name
    pub fn get(&self, name: &str) -> Option<&ModuleInfo> {
        self.modules.get(name)
    }

    /// Look up the canonical descriptor, failing for unknown names
    pub fn resolve(&self, name: &str) -> Result<&ModuleInfo> {
        self.get(name).ok_or_error(|| GoWalkerError::unknown_module(name))
    }

    /// Canonical identifier for a module name
    pub fn id_for(&self, name: &str) -> Result<Identifier> {
        self.resolve(name).map(ModuleInfo::to_id)
    }

    /// Name of the main module
    pub fn main_module_name(&self) -> &str {
        &self.main_module
    }

    /// Descriptor of the main module
    pub fn main_module(&self) -> Result<&ModuleInfo> {
        self.resolve(&self.main_module)
    }

    /// Identifier of the main module
    pub fn main_module_id(&self) -> Result<Identifier> {
        self.id_for(&self.main_module)
    }

    /// Check whether an identifier denotes the main module
    pub fn is_main_module(&self, id: &Identifier) -> bool {
        id.name == self.main_module
    }

    /// Map from original module name to replacement name, for replaced modules only
    pub fn aliases(&self) -> BTreeMap<String, String> {
        self.modules
            .iter()
            .filter(|(name, module)| **name != module.path)
            .map(|(name, module)| (name.clone(), module.path.clone()))
            .collect()
    }

    /// Canonical descriptors with the names they are registered under
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ModuleInfo)> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
