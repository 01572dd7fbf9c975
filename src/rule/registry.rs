use std::collections::HashMap;

use anyhow::{Context, Result};

use super::Rule;
use crate::config::ResolvedConfig;

pub struct RuleRegistry {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build the default registry with the built-in rules.
    pub fn default_registry() -> Self {
        let mut registry = Self::new();
        registry.register(Rule::username());
        registry.register(Rule::email());
        registry
    }

    /// Built-in rules followed by every rule defined in `config`.
    pub fn with_config(config: &ResolvedConfig) -> Result<Self> {
        let mut registry = Self::default_registry();
        for def in config.rules() {
            let rule = Rule::from_steps(
                def.name.as_str(),
                def.description.as_str(),
                &def.steps,
                def.case_insensitive,
            )
            .with_context(|| format!("rule `{}` does not compile", def.name))?;
            registry.register(rule);
        }
        Ok(registry)
    }

    /// Add a rule, replacing any rule already registered under the same name.
    pub fn register(&mut self, rule: Rule) {
        if let Some(&idx) = self.index.get(rule.name()) {
            self.rules[idx] = rule;
            return;
        }
        let idx = self.rules.len();
        self.index.insert(rule.name().to_string(), idx);
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&idx| &self.rules[idx])
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
