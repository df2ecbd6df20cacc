//! 凭据混淆：发送前把 `accessKey` / `credential` 编码为标准 Base64
//!
//! 注意：Base64 可逆，只能避免明文直接出现在请求体中，并不提供保密性。
//! 传输安全依赖 HTTPS；服务端按 Base64 解码，因此这里保持同样的编码。

use crate::models::{BackupOperate, ForBucket};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// 可能携带凭据字段的请求体
pub trait CarriesCredentials: Clone {
    fn access_key_mut(&mut self) -> &mut Option<String>;
    fn credential_mut(&mut self) -> &mut Option<String>;
}

impl CarriesCredentials for BackupOperate {
    fn access_key_mut(&mut self) -> &mut Option<String> {
        &mut self.access_key
    }

    fn credential_mut(&mut self) -> &mut Option<String> {
        &mut self.credential
    }
}

impl CarriesCredentials for ForBucket {
    fn access_key_mut(&mut self) -> &mut Option<String> {
        &mut self.access_key
    }

    fn credential_mut(&mut self) -> &mut Option<String> {
        &mut self.credential
    }
}

/// 返回编码后的独立副本，调用方持有的原值不受影响
///
/// 缺失或为空的字段保持原样，不会生成空串的编码结果。
pub fn redact_credentials<T: CarriesCredentials>(payload: &T) -> T {
    let mut copy = payload.clone();
    encode_in_place(copy.access_key_mut());
    encode_in_place(copy.credential_mut());
    copy
}

fn encode_in_place(field: &mut Option<String>) {
    if let Some(value) = field.as_mut().filter(|v| !v.is_empty()) {
        *value = STANDARD.encode(value.as_bytes());
    }
}
