//! Asset loading failure behavior.
//!
//! Every asset is a startup precondition: the resource layer must report
//! a missing file as an error (which the app layer turns into a fatal
//! diagnostic) rather than silently substituting anything.

use stillframe::resources::texture::{load_binary, load_string};

#[tokio::test]
async fn missing_text_asset_is_an_error() {
    let result = load_string("does_not_exist.wgsl").await;
    let err = result.expect_err("missing asset should not load");
    assert!(
        err.to_string().contains("does_not_exist.wgsl"),
        "diagnostic should name the missing file: {err}"
    );
}

#[tokio::test]
async fn missing_binary_asset_is_an_error() {
    let result = load_binary("does_not_exist.png").await;
    assert!(result.is_err());
}
