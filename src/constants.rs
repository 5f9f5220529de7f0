//= [Assigned Numbers](https://datatracker.ietf.org/doc/html/rfc3961#section-8) =//
pub mod etypes {
    pub const NULL: usize = 0;
    pub const DES_CBC_CRC: usize = 1;
    pub const DES_CBC_MD5: usize = 3;
    pub const DES3_CBC_SHA1_KD: usize = 16;
    pub const AES128_CTS_HMAC_SHA1_96: usize = 17;
    pub const AES256_CTS_HMAC_SHA1_96: usize = 18;
    //= [RFC 8009](https://www.rfc-editor.org/rfc/rfc8009.html#section-7) =//
    pub const AES128_CTS_HMAC_SHA256_128: usize = 19;
    pub const AES256_CTS_HMAC_SHA384_192: usize = 20;
    //= [RFC 4757](https://www.rfc-editor.org/rfc/rfc4757.html#section-2) =//
    pub const RC4_HMAC: usize = 23;
}

//= [Assigned Numbers](https://datatracker.ietf.org/doc/html/rfc3961#section-8) =//
pub mod cksum_types {
    pub const NULL: i32 = 0;
    pub const CRC32: i32 = 1;
    pub const DES_MAC: i32 = 4;
    pub const DES_MAC_K: i32 = 5;
    pub const RSA_MD5: i32 = 7;
    pub const RSA_MD5_DES: i32 = 8;
    pub const HMAC_SHA1_DES3_KD: i32 = 12;
    pub const HMAC_SHA1_96_AES128: i32 = 15;
    pub const HMAC_SHA1_96_AES256: i32 = 16;
    //= [RFC 8009](https://www.rfc-editor.org/rfc/rfc8009.html#section-7) =//
    pub const HMAC_SHA256_128_AES128: i32 = 19;
    pub const HMAC_SHA384_192_AES256: i32 = 20;
    //= [RFC 4757](https://www.rfc-editor.org/rfc/rfc4757.html#section-4) =//
    pub const HMAC_MD5: i32 = -138;
}

pub mod key_usages {
    //= [Key Usage Numbers](https://datatracker.ietf.org/doc/html/rfc4120#section-7.5.1) =//
    pub const AS_REQ_TIMESTAMP: i32 = 1;
    pub const TICKET_REP: i32 = 2;
    pub const AS_REP_ENC: i32 = 3;
    pub const TGS_REQ_AUTH_DATA_SESSION_KEY: i32 = 4;
    pub const TGS_REQ_AUTH_DATA_SUB_KEY: i32 = 5;
    pub const TGS_REQ_PA_DATA_AP_REQ_AUTHENTICATOR_CKSUM: i32 = 6;
    pub const TGS_REQ_PA_DATA_AP_REQ_AUTHENTICATOR: i32 = 7;
    pub const TGS_REP_ENC_SESSION_KEY: i32 = 8;
    pub const TGS_REP_ENC_SUB_KEY: i32 = 9;
    pub const AP_REQ_AUTHENTICATOR_CKSUM: i32 = 10;
    pub const AP_REQ_AUTHENTICATOR: i32 = 11;
    pub const AP_REP_ENC: i32 = 12;
    pub const KRB_PRIV_ENC_PART: i32 = 13;
    pub const KRB_CRED_ENC_PART: i32 = 14;
    pub const KRB_SAFE_CKSUM: i32 = 15;
    pub const AD_KDC_ISSUED_CKSUM: i32 = 19;

    //= [GSS API Key Usages](https://datatracker.ietf.org/doc/html/rfc4121#section-2) =//
    pub const ACCEPTOR_SEAL: i32 = 22;
    pub const ACCEPTOR_SIGN: i32 = 23;
    pub const INITIATOR_SEAL: i32 = 24;
    pub const INITIATOR_SIGN: i32 = 25;
}
