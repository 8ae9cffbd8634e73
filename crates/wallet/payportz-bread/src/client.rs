use async_trait::async_trait;
use payportz_multisig::{Amount, ChainCurrency, ExecutionError, TransferApi, TxReceipt};
use payportz_storage::generate_record_id;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use crate::error::BreadError;
use crate::types::{
    AccountDetails, AutomationSettings, Balance, Bank, BreadWallet, Envelope, OfframpReceipt,
    OfframpStatus, Quote, RampDirection, Rate, RawWallet, SwapRequest, TransferResult, WalletPage,
};

pub const DEFAULT_BASE_URL: &str = "https://processor-prod.up.railway.app";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Fiat currency the ramp and bank endpoints settle in.
pub const DEFAULT_FIAT_CURRENCY: &str = "NGN";

const SERVICE_KEY_HEADER: &str = "x-service-key";

#[derive(Debug, Clone)]
pub struct BreadClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl BreadClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BreadError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BreadError> {
        let response = request
            .header(SERVICE_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown")
                    )
                });
            log::warn!("Bread API returned {}: {}", status, message);
            return Err(BreadError::Api(message));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| BreadError::Decode(e.to_string()))?;
        envelope
            .data
            .ok_or_else(|| BreadError::Decode("response has no data".to_string()))
    }

    /// Send `amount` of `asset` from `wallet_id` to `receiver`.
    /// An amount of `-1` moves the entire balance.
    pub async fn transfer(
        &self,
        wallet_id: &str,
        amount: f64,
        receiver: &str,
        asset: &str,
    ) -> Result<TransferResult, BreadError> {
        log::info!("Bread transfer of {} {} to {} from wallet {}", amount, asset, receiver, wallet_id);
        let body = json!({
            "wallet_id": wallet_id,
            "amount": amount,
            "receiver": receiver,
            "asset": asset,
        });
        self.send(self.http.post(self.url("/transfer")).json(&body)).await
    }

    /// Create a wallet. A reference is generated when none is given.
    pub async fn create_wallet(&self, reference: Option<&str>) -> Result<BreadWallet, BreadError> {
        let reference = reference
            .map(str::to_string)
            .unwrap_or_else(|| generate_record_id("wallet"));
        let raw: RawWallet = self
            .send(
                self.http
                    .post(self.url("/wallet"))
                    .json(&json!({ "reference": reference })),
            )
            .await?;
        Ok(raw.into())
    }

    pub async fn get_wallet(&self, wallet_id: &str) -> Result<BreadWallet, BreadError> {
        self.send(
            self.http
                .get(self.url("/wallet"))
                .query(&[("wallet_id", wallet_id)]),
        )
        .await
    }

    pub async fn get_wallets(&self, page: u32) -> Result<WalletPage, BreadError> {
        self.send(
            self.http
                .get(self.url("/wallets"))
                .query(&[("page", page.max(1))]),
        )
        .await
    }

    pub async fn get_balance(&self, wallet_id: &str, asset: &str) -> Result<Balance, BreadError> {
        self.send(
            self.http
                .get(self.url("/balance"))
                .query(&[("wallet_id", wallet_id), ("asset", asset)]),
        )
        .await
    }

    /// Balances of every asset held by `wallet_id`.
    pub async fn get_balances(&self, wallet_id: &str) -> Result<Vec<Balance>, BreadError> {
        self.send(
            self.http
                .get(self.url("/balances"))
                .query(&[("wallet_id", wallet_id)]),
        )
        .await
    }

    /// Price converting `amount` between `currency` and `asset`.
    ///
    /// `amount` is the input side unless `exact_output` is set, in which
    /// case it is the amount to receive.
    pub async fn get_quote(
        &self,
        direction: RampDirection,
        amount: f64,
        currency: &str,
        asset: &str,
        exact_output: bool,
    ) -> Result<Quote, BreadError> {
        let body = json!({
            "amount": amount,
            "currency": currency,
            "asset": asset,
            "is_exact_output": exact_output,
        });
        self.send(
            self.http
                .post(self.url(&format!("/quote/{}", direction)))
                .json(&body),
        )
        .await
    }

    pub async fn get_rate(&self, direction: RampDirection, currency: &str) -> Result<Rate, BreadError> {
        self.send(
            self.http
                .get(self.url(&format!("/rate/{}", direction)))
                .query(&[("currency", currency)]),
        )
        .await
    }

    /// Sell `amount` of `asset` from `wallet_id` into the bank account
    /// registered as `beneficiary_id`.
    pub async fn execute_offramp(
        &self,
        wallet_id: &str,
        amount: f64,
        beneficiary_id: &str,
        asset: &str,
    ) -> Result<OfframpReceipt, BreadError> {
        log::info!("Bread offramp of {} {} from wallet {} to {}", amount, asset, wallet_id, beneficiary_id);
        let body = json!({
            "wallet_id": wallet_id,
            "amount": amount,
            "beneficiary_id": beneficiary_id,
            "asset": asset,
        });
        self.send(self.http.post(self.url("/offramp")).json(&body)).await
    }

    pub async fn get_offramp_status(
        &self,
        wallet_id: &str,
        reference: Option<&str>,
    ) -> Result<OfframpStatus, BreadError> {
        let mut query = vec![("wallet_id", wallet_id)];
        if let Some(reference) = reference {
            query.push(("reference", reference));
        }
        self.send(self.http.get(self.url("/status/offramp")).query(&query))
            .await
    }

    /// Convert between two assets in `wallet_id`, sending the proceeds to `receiver`.
    pub async fn swap(
        &self,
        wallet_id: &str,
        receiver: &str,
        request: &SwapRequest,
    ) -> Result<TransferResult, BreadError> {
        if request.from_amount.is_none() && request.to_amount.is_none() {
            return Err(BreadError::InvalidRequest(
                "swap needs a from or to amount".to_string(),
            ));
        }
        log::info!(
            "Bread swap {} -> {} in wallet {}",
            request.from_asset,
            request.to_asset,
            wallet_id
        );
        let mut body = serde_json::to_value(request)
            .map_err(|e| BreadError::InvalidRequest(e.to_string()))?;
        body["wallet_id"] = json!(wallet_id);
        body["receiver"] = json!(receiver);
        self.send(self.http.post(self.url("/swap")).json(&body)).await
    }

    pub async fn get_banks(&self, currency: &str) -> Result<Vec<Bank>, BreadError> {
        self.send(
            self.http
                .get(self.url("/banks"))
                .query(&[("currency", currency)]),
        )
        .await
    }

    /// Resolve the holder of a bank account.
    pub async fn lookup_account(
        &self,
        bank_code: &str,
        account_number: &str,
        currency: &str,
    ) -> Result<AccountDetails, BreadError> {
        let body = json!({
            "bank_code": bank_code,
            "currency": currency.to_lowercase(),
            "account_number": account_number,
        });
        self.send(self.http.post(self.url("/lookup")).json(&body)).await
    }

    pub async fn set_automation(
        &self,
        wallet_id: &str,
        settings: &AutomationSettings,
    ) -> Result<AutomationSettings, BreadError> {
        let mut body = serde_json::to_value(settings)
            .map_err(|e| BreadError::InvalidRequest(e.to_string()))?;
        body["wallet_id"] = json!(wallet_id);
        self.send(self.http.post(self.url("/automate")).json(&body)).await
    }
}

#[async_trait]
impl TransferApi for BreadClient {
    async fn transfer(
        &self,
        wallet_id: &str,
        amount: Amount,
        recipient: &str,
        asset: &ChainCurrency,
    ) -> Result<TxReceipt, ExecutionError> {
        let result = BreadClient::transfer(self, wallet_id, amount.value(), recipient, &asset.to_string())
            .await
            .map_err(|e| ExecutionError::Transfer(e.to_string()))?;
        Ok(TxReceipt {
            hash: result.hash,
            link: result.link,
        })
    }
}
