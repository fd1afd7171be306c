//! Wire types for the random-identity endpoint.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::domain::UserDraft;

/// Response body of the random-identity endpoint. Every field defaults
/// so a partial upstream payload still maps to a draft.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RandomUserDto {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub address: RandomUserAddressDto,
}

/// Nested address object of the upstream schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RandomUserAddressDto {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub street_address: String,
}

/// Parse the upstream `YYYY-MM-DD` date. A malformed value is tolerated
/// deliberately: the draft's date stays unset and a warning is logged.
fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(error) => {
            warn!(value = raw, %error, "ignoring malformed upstream date_of_birth");
            None
        }
    }
}

impl RandomUserDto {
    /// Flatten the upstream shape into a [`UserDraft`] with no identifier.
    pub(crate) fn into_draft(self) -> UserDraft {
        let date_of_birth = parse_date_of_birth(&self.date_of_birth);
        UserDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            avatar: self.avatar,
            phone_number: self.phone_number,
            date_of_birth,
            country: self.address.country,
            city: self.address.city,
            street_name: self.address.street_name,
            street_address: self.address.street_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn maps_full_payload_into_draft() {
        let dto: RandomUserDto = serde_json::from_str(
            r#"{
                "first_name": "Grace",
                "last_name": "Hopper",
                "username": "ghopper",
                "email": "grace@example.com",
                "avatar": "https://example.com/avatar.png",
                "phone_number": "+1 555 0100",
                "date_of_birth": "1906-12-09",
                "address": {
                    "country": "United States",
                    "city": "New York",
                    "street_name": "West 34th Street",
                    "street_address": "350 West 34th Street"
                }
            }"#,
        )
        .expect("decode dto");

        let draft = dto.into_draft();
        assert_eq!(draft.username, "ghopper");
        assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(1906, 12, 9));
        assert_eq!(draft.street_address, "350 West 34th Street");
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("09/12/1906")]
    #[case("")]
    fn malformed_date_becomes_none(#[case] raw: &str) {
        let dto = RandomUserDto {
            date_of_birth: raw.to_owned(),
            ..RandomUserDto::default()
        };
        assert_eq!(dto.into_draft().date_of_birth, None);
    }

    #[test]
    fn missing_address_maps_to_empty_fields() {
        let dto: RandomUserDto =
            serde_json::from_str(r#"{ "username": "ghopper", "email": "g@e.com" }"#)
                .expect("decode dto");
        let draft = dto.into_draft();
        assert_eq!(draft.country, "");
        assert_eq!(draft.city, "");
    }
}
