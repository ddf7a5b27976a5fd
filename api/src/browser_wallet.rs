//! EIP-1193 bridge to the wallet injected into the page as `window.ethereum`.

use std::cell::RefCell;

use futures::future::LocalBoxFuture;
use js_sys::Array;
use js_sys::Function;
use js_sys::Object;
use js_sys::Promise;
use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::readers::Account;
use crate::readers::AccountContext;
use crate::wallet::WalletError;
use crate::wallet::WalletProvider;
use crate::wallet::WatchAsset;

/// EIP-1193 "User Rejected Request".
const USER_REJECTED: f64 = 4001.0;

#[derive(Default)]
pub struct BrowserWallet {
    account: RefCell<Option<Account>>,
}

impl BrowserWallet {
    pub fn new() -> Self {
        Self::default()
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), WalletError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(wallet_error)
}

fn wallet_error(err: JsValue) -> WalletError {
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown wallet error".to_string());
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64());

    if code == Some(USER_REJECTED) {
        WalletError::Rejected(message)
    } else {
        WalletError::Provider(message)
    }
}

fn ethereum() -> Result<JsValue, WalletError> {
    let window: JsValue = web_sys::window().ok_or(WalletError::NoProvider)?.into();
    let provider = Reflect::get(&window, &JsValue::from_str("ethereum")).map_err(wallet_error)?;
    if provider.is_undefined() || provider.is_null() {
        return Err(WalletError::NoProvider);
    }
    Ok(provider)
}

/// `await window.ethereum.request({ method, params })`
async fn request(method: &str, params: Option<JsValue>) -> Result<JsValue, WalletError> {
    let provider = ethereum()?;
    let request: Function = Reflect::get(&provider, &JsValue::from_str("request"))
        .map_err(wallet_error)?
        .dyn_into()
        .map_err(|_| WalletError::Provider("ethereum.request is not a function".to_string()))?;

    let args = Object::new();
    set(&args, "method", &JsValue::from_str(method))?;
    if let Some(params) = params {
        set(&args, "params", &params)?;
    }

    let promise: Promise = request
        .call1(&provider, &args)
        .map_err(wallet_error)?
        .dyn_into()
        .map_err(|_| WalletError::Provider(format!("{} did not return a promise", method)))?;

    JsFuture::from(promise).await.map_err(wallet_error)
}

impl AccountContext for BrowserWallet {
    fn account(&self) -> Option<Account> {
        self.account.borrow().clone()
    }
}

impl WalletProvider for BrowserWallet {
    fn connect(&self) -> LocalBoxFuture<'_, Result<Account, WalletError>> {
        Box::pin(async move {
            let accounts: Array = request("eth_requestAccounts", None)
                .await?
                .dyn_into()
                .map_err(|_| WalletError::Provider("accounts response is not an array".to_string()))?;
            let account = accounts
                .get(0)
                .as_string()
                .map(Account::new)
                .ok_or_else(|| WalletError::Provider("wallet returned no accounts".to_string()))?;

            dioxus_logger::tracing::info!("connected wallet {}", account.abbreviated());
            *self.account.borrow_mut() = Some(account.clone());
            Ok(account)
        })
    }

    fn register_asset<'a>(
        &'a self,
        asset: &'a WatchAsset,
    ) -> LocalBoxFuture<'a, Result<bool, WalletError>> {
        Box::pin(async move {
            let options = Object::new();
            set(&options, "address", &JsValue::from_str(&asset.address))?;
            set(&options, "symbol", &JsValue::from_str(&asset.symbol))?;
            set(&options, "decimals", &JsValue::from(asset.decimals))?;
            set(&options, "image", &JsValue::from_str(&asset.icon_url))?;

            let params = Object::new();
            set(&params, "type", &JsValue::from_str(asset.standard.as_str()))?;
            set(&params, "options", &options)?;

            let added = request("wallet_watchAsset", Some(params.into())).await?;
            Ok(added.as_bool().unwrap_or(false))
        })
    }
}
