use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Client, codec::collection, endpoints::Endpoint, error::Result,
    utils::date_format::xero_datetime_format_option,
};

/// Invoice branding theme. Read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrandingTheme {
    #[serde(rename = "BrandingThemeID", default, skip_serializing_if = "Option::is_none")]
    pub branding_theme_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<u32>,
    #[serde(
        rename = "CreatedDateUTC",
        default,
        with = "xero_datetime_format_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date_utc: Option<OffsetDateTime>,
}

collection! {
    pub struct BrandingThemes(BrandingTheme) as "BrandingThemes" / "BrandingTheme";
}

#[instrument(skip(client))]
pub async fn list(client: &Client) -> Result<Vec<BrandingTheme>> {
    client.fetch_all::<BrandingThemes>(Endpoint::BrandingThemes).await
}
