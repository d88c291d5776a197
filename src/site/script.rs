use std::collections::BTreeMap;
use std::fmt::Write;

/// Module script that loads the wasm package and starts the parallax driver.
///
/// Build-time values are inlined as `const` declarations so the page needs no
/// extra requests beyond the package itself.
#[derive(Debug, Clone)]
pub struct Script {
    package: String,
    variables: BTreeMap<String, String>,
}

pub const SCENE_SELECTOR: &str = "SCENE_SELECTOR";
pub const OBJECT_SELECTOR: &str = "OBJECT_SELECTOR";

impl Script {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Defines `name` as a JSON string literal.
    pub fn add_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), json_string(value));
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "import init, {{ start_parallax }} from {};", json_string(&self.package));
        for (name, value) in &self.variables {
            let _ = writeln!(out, "const {name} = {value};");
        }
        let _ = writeln!(out, "await init();");
        if self.variables.contains_key(SCENE_SELECTOR) && self.variables.contains_key(OBJECT_SELECTOR) {
            let _ = writeln!(out, "start_parallax({SCENE_SELECTOR}, {OBJECT_SELECTOR});");
        }
        out
    }
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
