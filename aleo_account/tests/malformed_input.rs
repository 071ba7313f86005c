use aleo_account::{Address, EncodingError, PRIVATE_KEY_PREFIX, PrivateKey, ViewKey};

const PRIVATE_KEY: &str = "APrivateKey1xpBtAQmv5sHHWwZqya9UVbVBcGtnX95TAN7XSAQ6yLqE5bC";
const ADDRESS: &str = "aleo1d5hg2z3ma00382pngntdp68e74zv54jdxy249qhaujhks9c72yrs33ddah";

#[test]
fn private_key_text() {
    assert!(PRIVATE_KEY.parse::<PrivateKey>().is_ok());
    assert!(matches!(
        "".parse::<PrivateKey>(),
        Err(EncodingError::InvalidLength { .. })
    ));
    assert!(matches!(
        PRIVATE_KEY[..30].parse::<PrivateKey>(),
        Err(EncodingError::InvalidLength { .. })
    ));
    // a view key string has a different prefix and length
    let view_key = ViewKey::from_decryption_key([9; 32]).to_string();
    assert!(view_key.parse::<PrivateKey>().is_err());

    let mut bytes = bs58::decode(PRIVATE_KEY).into_vec().unwrap();
    assert_eq!(&bytes[..9], &PRIVATE_KEY_PREFIX[..]);
    bytes[8] = bytes[8].wrapping_add(1);
    assert!(matches!(
        bs58::encode(bytes).into_string().parse::<PrivateKey>(),
        Err(EncodingError::InvalidPrefix)
    ));
}

#[test]
fn address_text() {
    assert!(ADDRESS.parse::<Address>().is_ok());
    assert!(matches!("".parse::<Address>(), Err(EncodingError::Bech32(_))));
    assert!(matches!(
        ADDRESS[..40].parse::<Address>(),
        Err(EncodingError::Bech32(_))
    ));
    assert!(matches!(
        ADDRESS.replacen("aleo", "alep", 1).parse::<Address>(),
        Err(EncodingError::Bech32(_))
    ));
    assert!(PRIVATE_KEY.parse::<Address>().is_err());
}

#[test]
fn view_key_text() {
    assert!(matches!(
        "".parse::<ViewKey>(),
        Err(EncodingError::InvalidLength { .. })
    ));
    assert!(matches!(
        "AViewKey1".parse::<ViewKey>(),
        Err(EncodingError::InvalidLength { .. })
    ));
    assert!(PRIVATE_KEY.parse::<ViewKey>().is_err());
}
