use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The document `solc --combined-json` prints on stdout.
///
/// `contracts` keeps the order the compiler emitted (serde_json is built with
/// `preserve_order`), so "first" means first as printed.
#[derive(Debug, Deserialize)]
pub struct CombinedOutput {
    #[serde(default)]
    pub contracts: Map<String, Value>,
    pub version: Option<String>,
}

impl CombinedOutput {
    pub fn parse(stdout: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(stdout)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Takes the first compiled unit and its identifier (`<path>:<Name>`).
    /// A unit that is not an object of outputs is an error, not an empty unit.
    pub fn into_first(self) -> serde_json::Result<Option<(String, CompiledContract)>> {
        match self.contracts.into_iter().next() {
            Some((id, unit)) => Ok(Some((id, CompiledContract::from_value(unit)?))),
            None => Ok(None),
        }
    }
}

/// Outputs of one compiled unit, keyed by output kind (`abi`, `bin`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompiledContract(Map<String, Value>);

impl CompiledContract {
    fn from_value(value: Value) -> serde_json::Result<Self> {
        let mut outputs: Map<String, Value> = serde_json::from_value(value)?;
        // solc < 0.8.10 prints the ABI as a JSON string rather than an array.
        let decoded = match outputs.get("abi") {
            Some(Value::String(raw)) => Some(serde_json::from_str::<Value>(raw)?),
            _ => None,
        };
        if let Some(abi) = decoded {
            outputs.insert("abi".to_string(), abi);
        }
        Ok(Self(outputs))
    }

    pub fn abi(&self) -> Option<&Value> {
        self.0.get("abi")
    }

    pub fn bin(&self) -> Option<&str> {
        self.0.get("bin").and_then(Value::as_str)
    }

    /// Text form written to the artifact file: two-space indented JSON with a
    /// trailing newline.
    pub fn render(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_UNITS: &str = r#"{
        "contracts": {
            "Pair.sol:Zeta": {"abi": [], "bin": "6080aa"},
            "Pair.sol:Alpha": {"abi": [], "bin": "6080bb"}
        },
        "version": "0.8.24+commit.e11b9ed9.Linux.g++"
    }"#;

    #[test]
    fn first_unit_follows_emitted_order() {
        let output = CombinedOutput::parse(TWO_UNITS.as_bytes()).unwrap();
        assert_eq!(output.len(), 2);
        let (id, unit) = output.into_first().unwrap().unwrap();
        assert_eq!(id, "Pair.sol:Zeta");
        assert_eq!(unit.bin(), Some("6080aa"));
    }

    #[test]
    fn string_abi_is_decoded() {
        let raw = r#"{"contracts": {"Old.sol:Old": {
            "abi": "[{\"type\":\"function\",\"name\":\"get\"}]",
            "bin": "60"
        }}}"#;
        let (_, unit) = CombinedOutput::parse(raw.as_bytes())
            .unwrap()
            .into_first()
            .unwrap()
            .unwrap();
        let abi = unit.abi().unwrap();
        assert_eq!(abi[0]["name"], "get");
    }

    #[test]
    fn missing_contracts_is_empty() {
        let output = CombinedOutput::parse(br#"{"version": "0.8.24"}"#).unwrap();
        assert!(output.is_empty());
        assert!(output.into_first().unwrap().is_none());
    }

    #[test]
    fn render_keeps_key_order_and_ends_with_newline() {
        let raw = r#"{"contracts": {"A.sol:A": {"bin": "60", "abi": []}}}"#;
        let (_, unit) = CombinedOutput::parse(raw.as_bytes())
            .unwrap()
            .into_first()
            .unwrap()
            .unwrap();
        let text = unit.render().unwrap();
        assert_eq!(text, "{\n  \"bin\": \"60\",\n  \"abi\": []\n}\n");
    }

    #[test]
    fn non_object_unit_is_an_error() {
        let output = CombinedOutput::parse(br#"{"contracts": {"A.sol:A": "garbage"}}"#).unwrap();
        assert!(output.into_first().is_err());
    }

    #[test]
    fn undecodable_string_abi_is_an_error() {
        let raw = br#"{"contracts": {"A.sol:A": {"abi": "[not json", "bin": "60"}}}"#;
        let output = CombinedOutput::parse(raw).unwrap();
        assert!(output.into_first().is_err());
    }

    #[test]
    fn rejects_non_json() {
        assert!(CombinedOutput::parse(b"Warning: something").is_err());
    }
}
