//! Known answers under the real account parameters.
//!
//! Point `ALEO_PARAMS_DIR` at a directory holding `account_signature.params`,
//! `account_commitment.params` and `account_encryption.params` and run them
//! with `cargo test -p aleo_account --test known_answers -- --ignored`.
use aleo_account::{Account, Parameters, PrivateKey, Search};

const SEED: [u8; 32] = [
    225, 188, 136, 113, 36, 134, 74, 147, 46, 205, 27, 245, 37, 173, 115, 101, 220, 243, 27, 56,
    238, 226, 66, 152, 152, 245, 198, 104, 39, 128, 69, 183,
];
const PRIVATE_KEY: &str = "APrivateKey1xpBtAQmv5sHHWwZqya9UVbVBcGtnX95TAN7XSAQ6yLqE5bC";

const PEDERSEN_INPUT: [u8; 96] = [
    66, 74, 11, 145, 100, 99, 130, 89, 163, 76, 43, 120, 39, 210, 45, 246, 90, 99, 196, 204, 248,
    249, 81, 18, 98, 129, 227, 187, 223, 125, 77, 10, 51, 244, 232, 225, 249, 218, 217, 141, 51,
    181, 187, 65, 96, 148, 73, 47, 129, 46, 71, 202, 250, 82, 135, 25, 147, 218, 97, 92, 115, 5, 43,
    11, 144, 112, 228, 39, 76, 80, 243, 121, 42, 169, 114, 92, 122, 59, 231, 131, 252, 132, 245,
    137, 35, 225, 97, 182, 221, 193, 210, 192, 49, 145, 61, 242,
];

fn params() -> Parameters {
    Parameters::load_from_env()
        .unwrap()
        .expect("ALEO_PARAMS_DIR names the parameter directory")
}

#[test]
#[ignore = "needs ALEO_PARAMS_DIR"]
fn pedersen_hash() {
    let params = params();
    let hash = params.commitment.hash(&PEDERSEN_INPUT).unwrap();
    assert_eq!(
        hash.x().to_string(),
        "5396547586132350007729949313861469404261305737086483362749900864719137061534"
    );
    assert_eq!(
        hash.y().to_string(),
        "5347278242009712367012721659736647660641315059904831743920501275402848766032"
    );
    assert_eq!(
        hash.z().to_string(),
        "1797456748704958900957750485032022246420453371611725673379215846573002912605"
    );
    assert_eq!(
        hash.t().to_string(),
        "7137163236384982232555300942526908950902465003603796367373482163011780041459"
    );
}

#[test]
#[ignore = "needs ALEO_PARAMS_DIR"]
fn private_key_from_seed() {
    let params = params();
    let private_key = PrivateKey::from_seed(SEED, &params).unwrap();
    assert_eq!(private_key.counter(), 6077);
    assert_eq!(private_key.to_string(), PRIVATE_KEY);
}

#[test]
#[ignore = "needs ALEO_PARAMS_DIR"]
fn parsed_private_key_gives_the_same_account() {
    let params = params();
    let (private_key, decryption_key) = Search::new(SEED, &params).run().unwrap();
    let parsed: PrivateKey = PRIVATE_KEY.parse().unwrap();
    assert_eq!(parsed, private_key);

    let account = Account::from_private_key(parsed, &params).unwrap();
    assert_eq!(account.view_key().decryption_key(), &decryption_key);
    assert_eq!(account.address().to_string().len(), 63);
    assert_eq!(account, Account::from_seed(SEED, &params).unwrap());
}
