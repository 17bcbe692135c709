use crate::error::EvalError;
use serde_json::{Map, Value};

/// Variable environment.
///
/// Backed by `im::HashMap`, so extending a scope is an O(1) structural-sharing
/// clone and the parent scope is never touched. A `let` hands the extended copy
/// to its body and drops it afterwards, which is all scope restoration takes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    vars: im::HashMap<String, Value>,
}

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    /// Builds the initial environment from a program's `variables` mapping.
    pub fn from_map(vars: &Map<String, Value>) -> Self {
        vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Returns a child environment with `name` bound to `value`.
    ///
    /// An existing binding of the same name is shadowed in the child only.
    pub fn with(&self, name: impl Into<String>, value: Value) -> Self {
        Env {
            vars: self.vars.update(name.into(), value),
        }
    }

    /// Returns the value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Resolves a variable reference, failing with `UndefinedVariable`.
    pub fn resolve(&self, name: &str) -> Result<Value, EvalError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over bindings in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}

impl FromIterator<(String, Value)> for Env {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Env {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn child_scope_does_not_touch_parent() {
        let parent = Env::new().with("a", json!(1));
        let child = parent.with("a", json!(2)).with("b", json!(3));
        assert_eq!(parent.get("a"), Some(&json!(1)));
        assert!(!parent.contains("b"));
        assert_eq!(child.get("a"), Some(&json!(2)));
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn resolve_missing_name() {
        let env = Env::new();
        assert_eq!(
            env.resolve("missing"),
            Err(EvalError::UndefinedVariable("missing".into()))
        );
    }

    #[test]
    fn from_map_copies_all_variables() {
        let vars = json!({"x": 1, "y": "two"});
        let env = Env::from_map(vars.as_object().unwrap());
        assert_eq!(env.len(), 2);
        assert_eq!(env.resolve("y"), Ok(json!("two")));
    }
}
