use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Categories known to the service. Must match the service's category table.
pub const CATEGORIES: &[&str] = &[
    "Dog",
    "Cat",
    "Bird",
    "Duck",
    "Reptiles",
    "Fish",
    "Rabbit",
    "Guinea Pigs",
    "Hamster",
    "Gerbil",
    "Ferret",
    "Hedgehog",
    "Pig",
    "Horse",
    "Ostrich",
    "Turtle",
];

/// Page sizes a listing view offers
pub const AD_PAGE_SIZES: &[usize] = &[1, 5, 10, 20, 30, 40];

/// A classified ad as returned by the listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ad {
    /// Server-assigned id
    pub ad_id: i64,
    /// Author display name
    pub display_name: String,
    /// Author contact email
    pub email: String,
    /// Author contact phone
    pub phone: String,
    pub pet_name: String,
    pub category: String,
    pub pet_age: f64,
    pub pet_gender: String,
    /// Free-text ad body
    pub ad_content: String,
    /// Path under the image host; empty when the ad has no image
    #[serde(default)]
    pub image_path: String,
    /// Creation time as reported by the service
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Ad {
    /// Image path, or `None` when the ad was created without one
    pub fn image(&self) -> Option<&str> {
        if self.image_path.is_empty() {
            None
        } else {
            Some(&self.image_path)
        }
    }
}

/// One page of ads plus the total count across all pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdPage {
    pub ads: Vec<Ad>,
    #[serde(rename = "totalAds")]
    pub total_ads: u64,
}

impl From<AdPage> for crate::pager::PageData<Ad> {
    fn from(page: AdPage) -> Self {
        crate::pager::PageData {
            items: page.ads,
            total: page.total_ads,
        }
    }
}

/// Input for creating a new ad. The optional image travels separately as a
/// multipart file part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAd {
    pub category: String,
    pub pet_name: String,
    pub pet_age: f64,
    pub pet_gender: String,
    pub ad_content: String,
}

/// The authenticated user, as returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_ad_page_wire_shape() {
        let body = r#"{
            "ads": [{
                "ad_id": 7,
                "display_name": "Dana",
                "email": "dana@example.com",
                "phone": "050-1234567",
                "pet_name": "Whiskers",
                "category": "Cat",
                "pet_age": 1,
                "pet_gender": "Female",
                "ad_content": "Playful and affectionate.",
                "image_path": "/images/whiskers.png",
                "created_at": "2024-05-01T12:34:56"
            }],
            "totalAds": 25
        }"#;

        let page: AdPage = serde_json::from_str(body).unwrap();

        assert_eq!(page.total_ads, 25);
        assert_eq!(page.ads.len(), 1);
        assert_eq!(page.ads[0].pet_name, "Whiskers");
        assert_eq!(page.ads[0].image(), Some("/images/whiskers.png"));
    }

    #[test]
    fn test_ad_without_image_or_timestamp() {
        let body = r#"{
            "ad_id": 1,
            "display_name": "Avi",
            "email": "avi@example.com",
            "phone": "050-0000000",
            "pet_name": "Rex",
            "category": "Dog",
            "pet_age": 3.5,
            "pet_gender": "Male",
            "ad_content": "Gentle giant."
        }"#;

        let ad: Ad = serde_json::from_str(body).unwrap();

        assert_eq!(ad.image(), None);
        assert!(ad.created_at.is_none());
    }

    #[test]
    fn test_user_profile_roundtrip() {
        let body = r#"{"id":3,"username":"dana","display_name":"Dana","email":"dana@example.com","phone":"050-1234567"}"#;
        let user: UserProfile = serde_json::from_str(body).unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.username, "dana");
    }
}
