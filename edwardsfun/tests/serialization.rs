#![cfg(feature = "serde")]
use edwardsfun::{AffinePoint, G};

#[test]
fn affine_point_json_is_hex() {
    let json = serde_json::to_string(G).unwrap();
    assert_eq!(json, format!("\"{}\"", G));
    let decoded: AffinePoint = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, *G);
}

#[test]
fn invalid_point_json_is_rejected() {
    let json = format!("\"{}\"", edwardsfun::hex::encode(&[0xffu8; 32]));
    assert!(serde_json::from_str::<AffinePoint>(&json).is_err());
    assert!(serde_json::from_str::<AffinePoint>("\"00\"").is_err());
}
