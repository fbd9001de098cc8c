//! Private account endpoints
//!
//! These endpoints require authentication.

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::auth::{Credentials, RequestSigner};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpMethod, HttpRequest, Transport};
use crate::types::{AccountInfo, Balance};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    transport: &'a dyn Transport,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(transport: &'a dyn Transport, credentials: &'a Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Sign the parameter list and send it as the URL query of a GET
    async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let signer = RequestSigner::new(self.credentials);
        let signed = signer.signed_query(params)?;

        let request = HttpRequest::new(HttpMethod::Get, path)
            .with_query(signed)
            .with_api_key(self.credentials.api_key());

        debug!(path, "Making authenticated request");

        let body = self.transport.send(request).await?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Get account state and balances
    ///
    /// GET /api/v3/account
    ///
    /// The request is stamped with the current wall clock at whole-second
    /// resolution, converted to epoch milliseconds.
    #[instrument(skip(self))]
    pub async fn account_info(&self) -> RestResult<AccountInfo> {
        let timestamp_ms = Utc::now().timestamp() as u64 * 1000;
        let params = [("timestamp", timestamp_ms.to_string())];

        self.get_signed("/api/v3/account", &params).await
    }

    /// Get all per-asset balances
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        Ok(self.account_info().await?.balances)
    }

    /// Get the balance of one asset
    ///
    /// # Arguments
    /// * `asset` - Asset code (e.g. "BTC")
    ///
    /// # Errors
    /// [`RestError::AssetNotFound`] when the account holds no entry for
    /// the asset.
    #[instrument(skip(self))]
    pub async fn balance_for_asset(&self, asset: &str) -> RestResult<Balance> {
        let balances = self.balances().await?;

        balances
            .into_iter()
            .find(|balance| balance.asset == asset)
            .ok_or_else(|| RestError::AssetNotFound {
                asset: asset.to_string(),
            })
    }
}
