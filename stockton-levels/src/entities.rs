use na::Vector3;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Default)]
/// A game entity
pub struct Entity {
    pub attributes: HashMap<String, String>,
}

impl Entity {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The entity's classname, or an empty string if it has none.
    pub fn classname(&self) -> &str {
        self.get("classname").unwrap_or("")
    }

    /// Parse the `origin` attribute, formatted as `"x y z"`.
    /// Returns `None` if it's missing or malformed.
    pub fn origin(&self) -> Option<Vector3<f64>> {
        let mut parts = self.get("origin")?.split_whitespace().map(str::parse::<f64>);

        let x = parts.next()?.ok()?;
        let y = parts.next()?.ok()?;
        let z = parts.next()?.ok()?;

        if parts.next().is_some() {
            return None;
        }

        Some(Vector3::new(x, y, z))
    }
}
