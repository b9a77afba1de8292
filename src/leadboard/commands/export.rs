use crate::error::Result;
use crate::store::DataStore;

/// Serializes the current lead list as a pretty-printed JSON array.
pub fn run<S: DataStore>(store: &S) -> Result<String> {
    let leads = store.list_leads()?;
    Ok(serde_json::to_string_pretty(&leads)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn uses_camel_case_field_names() {
        let fixture = StoreFixture::new().with_sample_leads();
        let json = run(&fixture.store).unwrap();

        assert!(json.starts_with('['));
        assert!(json.contains("\"nextFollowUp\""));
        assert!(json.contains("\"assignedTo\": \"Sarah Johnson\""));
        assert!(json.contains("\"status\": \"proposal\""));
    }

    #[test]
    fn empty_store_is_an_empty_array() {
        let fixture = StoreFixture::new();
        assert_eq!(run(&fixture.store).unwrap(), "[]");
    }
}
