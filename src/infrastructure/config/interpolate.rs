//! Custom YAML tag resolution for configuration files.
//!
//! Two tags are understood: `!path` interpolates `${VAR}` environment
//! references in a string scalar, and `!joinPath` joins a sequence of
//! segments with the platform path separator. Interpolation also runs
//! implicitly over every untagged string scalar, so `${VAR}` references
//! resolve without an explicit tag.

use std::env;
use std::path::PathBuf;

use regex::Regex;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use super::loader::ConfigError;

/// Resolves custom tags and `${VAR}` references over a parsed document.
pub struct TagResolver {
    env_ref: Regex,
}

impl TagResolver {
    pub fn new() -> Self {
        Self {
            env_ref: Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap(),
        }
    }

    /// Resolve every tag and environment reference in `value`.
    ///
    /// Returns a document free of tagged nodes. An unset environment
    /// variable or an unknown tag is an error; configuration loading is
    /// one-shot and the caller treats failure as fatal.
    pub fn resolve(&self, value: Value) -> Result<Value, ConfigError> {
        match value {
            Value::Tagged(tagged) => self.resolve_tagged(*tagged),
            Value::String(s) => Ok(Value::String(self.interpolate(&s)?)),
            Value::Sequence(seq) => seq
                .into_iter()
                .map(|v| self.resolve(v))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Value::Mapping(map) => {
                let mut resolved = Mapping::new();
                for (key, val) in map {
                    resolved.insert(key, self.resolve(val)?);
                }
                Ok(Value::Mapping(resolved))
            }
            other => Ok(other),
        }
    }

    fn resolve_tagged(&self, tagged: TaggedValue) -> Result<Value, ConfigError> {
        if tagged.tag == "path" {
            match tagged.value {
                Value::String(s) => Ok(Value::String(self.interpolate(&s)?)),
                _ => Err(ConfigError::InvalidPathPayload),
            }
        } else if tagged.tag == "joinPath" {
            match tagged.value {
                Value::Sequence(segments) => self.join_path(segments),
                _ => Err(ConfigError::InvalidJoinPayload),
            }
        } else {
            Err(ConfigError::UnsupportedTag(tagged.tag.to_string()))
        }
    }

    fn join_path(&self, segments: Vec<Value>) -> Result<Value, ConfigError> {
        let mut path = PathBuf::new();
        for segment in segments {
            match segment {
                Value::String(s) => path.push(self.interpolate(&s)?),
                Value::Number(n) => path.push(n.to_string()),
                _ => return Err(ConfigError::InvalidJoinPayload),
            }
        }
        Ok(Value::String(path.to_string_lossy().into_owned()))
    }

    /// Substitute `${VAR}` references from the process environment.
    fn interpolate(&self, raw: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(raw.len());
        let mut last = 0;
        for caps in self.env_ref.captures_iter(raw) {
            let reference = caps.get(0).unwrap();
            let name = &caps[1];
            let value =
                env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
            out.push_str(&raw[last..reference.start()]);
            out.push_str(&value);
            last = reference.end();
        }
        out.push_str(&raw[last..]);
        Ok(out)
    }
}

impl Default for TagResolver {
    fn default() -> Self {
        Self::new()
    }
}
