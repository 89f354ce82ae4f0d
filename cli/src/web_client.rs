use std::path::Path;

use log::debug;
use rehome_core::{AdPage, FetchError, NewAd, UserProfile};
use serde::de::DeserializeOwned;

/// HTTP surface of the classifieds service.
///
/// One method per endpoint; listing methods return the page/total shape the
/// pagination engine consumes, everything else returns the service's
/// human-readable response text.
#[cfg_attr(test, mockall::automock)]
pub trait Client {
    fn list_ads<'a>(
        &self,
        page: usize,
        per_page: usize,
        category: Option<&'a str>,
    ) -> Result<AdPage, FetchError>;

    fn list_favorites(&self, user_id: i64, page: usize, per_page: usize)
        -> Result<AdPage, FetchError>;

    fn list_user_ads(&self, user_id: i64, page: usize, per_page: usize)
        -> Result<AdPage, FetchError>;

    fn add_favorite(&self, user_id: i64, ad_id: i64) -> Result<String, FetchError>;

    fn remove_favorite(&self, user_id: i64, ad_id: i64) -> Result<String, FetchError>;

    fn create_ad<'a>(
        &self,
        user: &UserProfile,
        ad: &NewAd,
        image: Option<&'a Path>,
    ) -> Result<String, FetchError>;

    fn delete_ad(&self, ad_id: i64, image_path: &str) -> Result<String, FetchError>;

    fn login(&self, username: &str, password: &str) -> Result<UserProfile, FetchError>;

    fn register(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<String, FetchError>;
}

/// Blocking reqwest implementation of [`Client`]
pub struct HttpClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        HttpClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn network(e: reqwest::Error) -> FetchError {
    FetchError::Network(e.to_string())
}

/// Read a response whose body is the service's message text
fn read_text(resp: reqwest::blocking::Response) -> Result<String, FetchError> {
    let status = resp.status();
    let body = resp.text().map_err(|e| FetchError::Decode(e.to_string()))?;

    if status.is_success() {
        Ok(body)
    } else {
        let message = if body.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            body
        };
        Err(FetchError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Read a 2xx JSON body; non-2xx bodies are the error message
fn read_json<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T, FetchError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        let message = if body.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            body
        };
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    resp.json().map_err(|e| FetchError::Decode(e.to_string()))
}

impl Client for HttpClient {
    fn list_ads<'a>(
        &self,
        page: usize,
        per_page: usize,
        category: Option<&'a str>,
    ) -> Result<AdPage, FetchError> {
        debug!("GET /get_all_ads page={page} per_page={per_page} category={category:?}");
        let resp = self
            .http
            .get(self.url("/get_all_ads"))
            .query(&[
                ("pageNum", page.to_string()),
                ("adsPerPage", per_page.to_string()),
                ("category", category.unwrap_or("").to_string()),
            ])
            .send()
            .map_err(network)?;

        read_json(resp)
    }

    fn list_favorites(
        &self,
        user_id: i64,
        page: usize,
        per_page: usize,
    ) -> Result<AdPage, FetchError> {
        debug!("GET /get_user_favorites_ads user_id={user_id} page={page}");
        let resp = self
            .http
            .get(self.url("/get_user_favorites_ads"))
            .query(&[
                ("user_id", user_id.to_string()),
                ("pageNum", page.to_string()),
                ("adsPerPage", per_page.to_string()),
            ])
            .send()
            .map_err(network)?;

        read_json(resp)
    }

    fn list_user_ads(
        &self,
        user_id: i64,
        page: usize,
        per_page: usize,
    ) -> Result<AdPage, FetchError> {
        debug!("GET /get_user_ads user_id={user_id} page={page}");
        let resp = self
            .http
            .get(self.url("/get_user_ads"))
            .query(&[
                ("user_id", user_id.to_string()),
                ("pageNum", page.to_string()),
                ("adsPerPage", per_page.to_string()),
            ])
            .send()
            .map_err(network)?;

        read_json(resp)
    }

    fn add_favorite(&self, user_id: i64, ad_id: i64) -> Result<String, FetchError> {
        debug!("PUT /add_ads_to_favorites user_id={user_id} ad_id={ad_id}");
        let resp = self
            .http
            .put(self.url("/add_ads_to_favorites"))
            .query(&[("user_id", user_id), ("ad_id", ad_id)])
            .send()
            .map_err(network)?;

        read_text(resp)
    }

    fn remove_favorite(&self, user_id: i64, ad_id: i64) -> Result<String, FetchError> {
        debug!("DELETE /delete_ad_from_favorites user_id={user_id} ad_id={ad_id}");
        let resp = self
            .http
            .delete(self.url("/delete_ad_from_favorites"))
            .query(&[("user_id", user_id), ("ad_id", ad_id)])
            .send()
            .map_err(network)?;

        read_text(resp)
    }

    fn create_ad<'a>(
        &self,
        user: &UserProfile,
        ad: &NewAd,
        image: Option<&'a Path>,
    ) -> Result<String, FetchError> {
        debug!("PUT /create_new_ad pet_name={}", ad.pet_name);
        let mut form = reqwest::blocking::multipart::Form::new()
            .text("user_id", user.id.to_string())
            .text("user_name", user.username.clone())
            .text("category", ad.category.clone())
            .text("pet_name", ad.pet_name.clone())
            .text("pet_age", ad.pet_age.to_string())
            .text("pet_gender", ad.pet_gender.clone())
            .text("ad_content", ad.ad_content.clone());

        if let Some(path) = image {
            form = form
                .file("image", path)
                .map_err(|e| FetchError::Network(format!("Could not read image file: {e}")))?;
        }

        let resp = self
            .http
            .put(self.url("/create_new_ad"))
            .multipart(form)
            .send()
            .map_err(network)?;

        read_text(resp)
    }

    fn delete_ad(&self, ad_id: i64, image_path: &str) -> Result<String, FetchError> {
        debug!("DELETE /delete_ad ad_id={ad_id}");
        let resp = self
            .http
            .delete(self.url("/delete_ad"))
            .query(&[
                ("ad_id", ad_id.to_string()),
                ("image_path", image_path.to_string()),
            ])
            .send()
            .map_err(network)?;

        read_text(resp)
    }

    fn login(&self, username: &str, password: &str) -> Result<UserProfile, FetchError> {
        debug!("POST /login username={username}");
        let resp = self
            .http
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .map_err(network)?;

        read_json(resp)
    }

    fn register(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<String, FetchError> {
        debug!("PUT /register username={username}");
        let resp = self
            .http
            .put(self.url("/register"))
            .form(&[
                ("username", username),
                ("password", password),
                ("display_name", display_name),
                ("email", email),
                ("phone", phone),
            ])
            .send()
            .map_err(network)?;

        read_text(resp)
    }
}
