use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde_yml::Value;

use crate::rule::Step;

pub const DEFAULT_CONFIG_FILE: &str = ".fluent-regex.yml";

/// A rule definition read from the `Rules` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub name: String,
    pub description: String,
    pub case_insensitive: bool,
    pub steps: Vec<Step>,
}

/// Resolved configuration from .fluent-regex.yml.
#[derive(Debug, Default)]
pub struct ResolvedConfig {
    /// File the config was read from; `None` when no file was found.
    path: Option<PathBuf>,
    rules: Vec<RuleConfig>,
}

/// Load config from the given path, or look for `.fluent-regex.yml` in the
/// current directory. A missing default file yields an empty config; a
/// missing explicit path is an error.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(ResolvedConfig::default());
            }
            p.to_path_buf()
        }
    };

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let raw: Value = serde_yml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    let mut rules = Vec::new();
    if let Some(section) = raw
        .as_mapping()
        .and_then(|map| map.get(&Value::String("Rules".to_string())))
    {
        let section = section
            .as_mapping()
            .ok_or_else(|| anyhow!("`Rules` must be a mapping of rule names"))?;
        for (key, value) in section {
            let name = key
                .as_str()
                .ok_or_else(|| anyhow!("rule names must be strings"))?;
            let rule = parse_rule(name, value).with_context(|| format!("invalid rule `{name}`"))?;
            rules.push(rule);
        }
    }

    Ok(ResolvedConfig {
        path: Some(config_path),
        rules,
    })
}

impl ResolvedConfig {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn rules(&self) -> &[RuleConfig] {
        &self.rules
    }
}

fn parse_rule(name: &str, value: &Value) -> Result<RuleConfig> {
    let map = value
        .as_mapping()
        .ok_or_else(|| anyhow!("expected a mapping with `Steps`"))?;

    let mut rule = RuleConfig {
        name: name.to_string(),
        description: String::new(),
        case_insensitive: false,
        steps: Vec::new(),
    };
    let mut saw_steps = false;

    for (k, v) in map {
        let key = match k.as_str() {
            Some(s) => s,
            None => continue,
        };
        match key {
            "Description" => {
                rule.description = v
                    .as_str()
                    .ok_or_else(|| anyhow!("`Description` must be a string"))?
                    .to_string();
            }
            "CaseInsensitive" => {
                rule.case_insensitive = v
                    .as_bool()
                    .ok_or_else(|| anyhow!("`CaseInsensitive` must be true or false"))?;
            }
            "Steps" => {
                rule.steps = parse_steps(v)?;
                saw_steps = true;
            }
            other => bail!("unknown key `{other}`"),
        }
    }

    if !saw_steps {
        bail!("missing `Steps`");
    }
    Ok(rule)
}

fn parse_steps(value: &Value) -> Result<Vec<Step>> {
    let seq = value
        .as_sequence()
        .ok_or_else(|| anyhow!("steps must be a list"))?;
    seq.iter().map(parse_step).collect()
}

fn parse_step(value: &Value) -> Result<Step> {
    if let Some(name) = value.as_str() {
        return Step::from_name(name).ok_or_else(|| anyhow!("unknown step `{name}`"));
    }

    let map = match value.as_mapping() {
        Some(map) if map.len() == 1 => map,
        _ => bail!("a step is an operation name or a single-key mapping"),
    };
    let Some((k, arg)) = map.iter().next() else {
        bail!("empty step");
    };
    let key = k
        .as_str()
        .ok_or_else(|| anyhow!("step names must be strings"))?;

    let step = match key {
        "literal" => Step::Literal(string_arg(key, arg)?),
        "any_of" => Step::AnyOf(string_arg(key, arg)?),
        "any_character_except" => Step::AnyCharacterExcept(string_arg(key, arg)?),
        "none_of" => Step::NoneOf(string_arg(key, arg)?),
        "exactly" => Step::Exactly(count_arg(key, arg)?),
        "at_least" => Step::AtLeast(count_arg(key, arg)?),
        "between" => {
            let bounds = arg
                .as_sequence()
                .filter(|seq| seq.len() == 2)
                .ok_or_else(|| anyhow!("`between` takes [min, max]"))?;
            Step::Between(count_arg(key, &bounds[0])?, count_arg(key, &bounds[1])?)
        }
        "group" => Step::Group(parse_steps(arg)?),
        "non_capturing_group" => Step::NonCapturingGroup(parse_steps(arg)?),
        "named_group" => {
            let group = arg
                .as_mapping()
                .ok_or_else(|| anyhow!("`named_group` takes `name` and `steps`"))?;
            let name = group
                .get(&Value::String("name".to_string()))
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow!("`named_group` needs a string `name`"))?;
            let steps = group
                .get(&Value::String("steps".to_string()))
                .ok_or_else(|| anyhow!("`named_group` needs `steps`"))?;
            Step::NamedGroup {
                name: name.to_string(),
                steps: parse_steps(steps)?,
            }
        }
        other if Step::from_name(other).is_some() => {
            bail!("step `{other}` takes no argument")
        }
        other => bail!("unknown step `{other}`"),
    };
    Ok(step)
}

fn string_arg(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow!("`{key}` takes a string"))
}

fn count_arg(key: &str, value: &Value) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| anyhow!("`{key}` takes a non-negative count"))
}
