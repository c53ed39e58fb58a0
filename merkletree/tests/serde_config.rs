//! Options and proofs through serde, as read from a config file or shipped
//! as JSON.

#![cfg(feature = "serde")]

use merkletree::{Digest, HashStrategy, MerklePath, MerkleTree, TreeOptions};

#[test]
fn options_load_from_toml() {
    let options: TreeOptions = toml::from_str(
        r#"
        hasher = "keccak256"
        elide_duplicates = true
        "#,
    )
    .expect("parse options");
    assert_eq!(
        options,
        TreeOptions::with_strategy(HashStrategy::Keccak256).elide_duplicates(true)
    );
}

#[test]
fn elide_duplicates_defaults_to_false() {
    for strategy in HashStrategy::ALL {
        let source = format!("hasher = \"{}\"", strategy.name());
        let options: TreeOptions = toml::from_str(&source).expect("parse options");
        assert_eq!(options, TreeOptions::with_strategy(strategy));
    }
}

#[test]
fn unknown_or_missing_hasher_is_rejected() {
    assert!(toml::from_str::<TreeOptions>(r#"hasher = "md5""#).is_err());
    assert!(toml::from_str::<TreeOptions>("elide_duplicates = true").is_err());
}

#[test]
fn strategy_names_serialize_lowercase() {
    for strategy in HashStrategy::ALL {
        let json = serde_json::to_string(&strategy).expect("serialize");
        assert_eq!(json, format!("\"{}\"", strategy.name()));
    }
}

#[test]
fn path_and_root_round_trip_through_json() {
    let tree = MerkleTree::with_strategy(
        vec!["alpha", "beta", "gamma", "delta", "epsilon"],
        HashStrategy::Blake3,
    )
    .expect("build");
    let path = tree.merkle_path(&"gamma").expect("path");

    let path_json = serde_json::to_string(&path).expect("serialize path");
    let root_json = serde_json::to_string(tree.root()).expect("serialize root");

    let path: MerklePath = serde_json::from_str(&path_json).expect("deserialize path");
    let root: Digest = serde_json::from_str(&root_json).expect("deserialize root");
    assert_eq!(&root, tree.root());
    assert_eq!(path.leaf_index(), 2);
    assert_eq!(
        path.verify_content("gamma", &root, &HashStrategy::Blake3),
        Ok(true)
    );
}
