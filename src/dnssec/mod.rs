pub mod denial;
pub mod key_tag;
pub mod signer;

pub use denial::{synthesize_nsec, synthesize_referral_nsec, DenialKind};
pub use key_tag::calculate_key_tag;
pub use signer::{cdnskey_rdata, cds_rdata, dnskey_rdata, sign_section, SigningContext, SigningKey};
