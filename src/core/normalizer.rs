use crate::core::identifier::IdentifierValidator;
use crate::core::schema::adapter_for;
use crate::domain::model::{CanonicalBanAction, IdentifierSet, RawBanRecord, Rejection, SchemaKind};

/// Turns one raw export record into a [`CanonicalBanAction`].
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    validator: IdentifierValidator,
}

impl RecordNormalizer {
    pub fn new(validator: IdentifierValidator) -> Self {
        Self { validator }
    }

    pub fn normalize(
        &self,
        record: &RawBanRecord,
        schema: SchemaKind,
    ) -> Result<CanonicalBanAction, Rejection> {
        let fields = record.as_object().ok_or(Rejection::NotAnObject)?;

        // identifiers 先檢查，才能分辨是哪一步被拒
        let identifiers = self.valid_identifiers(record)?;
        let extracted = adapter_for(schema).extract_fields(fields)?;

        Ok(CanonicalBanAction {
            identifiers,
            author: extracted.author,
            reason: extracted.reason,
            expiration: extracted.expiration,
        })
    }

    fn valid_identifiers(&self, record: &RawBanRecord) -> Result<IdentifierSet, Rejection> {
        let identifiers = record
            .get("identifiers")
            .and_then(|v| v.as_array())
            .map(|ids| {
                ids.iter()
                    .filter(|id| self.validator.is_valid_value(id))
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default();

        IdentifierSet::new(identifiers).ok_or(Rejection::NoValidIdentifiers)
    }
}
