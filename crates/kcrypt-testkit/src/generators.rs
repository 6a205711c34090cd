//! Proptest generators for property-based testing.
//!
//! Generated parameters render to registry text the way the kernel prints
//! `/proc/crypto`, and also map to the [`Cipher`] they must decode to.

use std::fmt::Write;

use proptest::prelude::*;

use kcrypt_registry::{AlgorithmType, Cipher, CipherName};

/// Generate an algorithm or driver name.
pub fn algorithm_name() -> impl Strategy<Value = String> {
    "[a-z0-9_][a-z0-9_(),-]{0,31}".prop_map(String::from)
}

/// Generate a module name (may be empty).
pub fn module_name() -> impl Strategy<Value = String> {
    "[a-z0-9_]{0,16}".prop_map(String::from)
}

/// Generate an algorithm type.
pub fn algorithm_type() -> impl Strategy<Value = AlgorithmType> {
    prop_oneof![
        Just(AlgorithmType::Cipher),
        Just(AlgorithmType::Compression),
        Just(AlgorithmType::Aead),
        Just(AlgorithmType::Skcipher),
        Just(AlgorithmType::Shash),
        Just(AlgorithmType::Ahash),
        Just(AlgorithmType::Rng),
        Just(AlgorithmType::Kpp),
        Just(AlgorithmType::Akcipher),
        Just(AlgorithmType::Scomp),
        "[a-z]{3,10}".prop_map(AlgorithmType::from),
    ]
}

/// Generate a self-test result.
pub fn self_test() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("passed".to_string()),
        Just("unknown".to_string()),
        Just(String::new()),
    ]
}

/// Parameters for generating one registry block.
#[derive(Debug, Clone)]
pub struct CipherParams {
    pub name: String,
    pub driver: String,
    pub module: String,
    pub priority: i32,
    pub reference_count: u32,
    pub self_test: String,
    pub is_internal: bool,
    pub algorithm_type: AlgorithmType,
    pub is_async: Option<bool>,
    pub sizes: [Option<u32>; 7],
    /// Append a key the record does not model.
    pub extra_key: bool,
}

impl Arbitrary for CipherParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            (algorithm_name(), algorithm_name(), module_name()),
            any::<i32>(),
            any::<u32>(),
            self_test(),
            any::<bool>(),
            algorithm_type(),
            any::<Option<bool>>(),
            any::<[Option<u32>; 7]>(),
            any::<bool>(),
        )
            .prop_map(
                |((name, driver, module), priority, refcnt, self_test, internal, ty, is_async, sizes, extra_key)| {
                    CipherParams {
                        name,
                        driver,
                        module,
                        priority,
                        reference_count: refcnt,
                        self_test,
                        is_internal: internal,
                        algorithm_type: ty,
                        is_async,
                        sizes,
                        extra_key,
                    }
                },
            )
            .boxed()
    }
}

const SIZE_KEYS: [&str; 7] = [
    "blocksize",
    "min keysize",
    "max keysize",
    "ivsize",
    "chunksize",
    "walksize",
    "digestsize",
];

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Render parameters as one registry block, without a trailing blank line.
pub fn render_block(params: &CipherParams) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &dyn std::fmt::Display| {
        let _ = writeln!(out, "{key:<13}: {value}");
    };

    line("name", &params.name);
    line("driver", &params.driver);
    line("module", &params.module);
    line("priority", &params.priority);
    line("refcnt", &params.reference_count);
    line("selftest", &params.self_test);
    line("internal", &yes_no(params.is_internal));
    line("type", &params.algorithm_type);
    if let Some(is_async) = params.is_async {
        line("async", &yes_no(is_async));
    }
    for (key, size) in SIZE_KEYS.into_iter().zip(params.sizes) {
        if let Some(size) = size {
            line(key, &size);
        }
    }
    if params.extra_key {
        line("geniv", &"<none>");
    }
    out
}

/// Render several blocks as a registry, blank-line separated.
pub fn render_registry(params: &[CipherParams]) -> String {
    params
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The record a rendered block must decode to.
pub fn cipher_from_params(params: &CipherParams) -> Cipher {
    let [block_size, min_keysize, max_keysize, iv_size, chunk_size, walk_size, digest_size] =
        params.sizes;
    Cipher {
        name: CipherName::new(params.name.clone()),
        driver: params.driver.clone(),
        module: params.module.clone(),
        priority: params.priority,
        reference_count: params.reference_count,
        self_test: params.self_test.clone(),
        is_internal: params.is_internal,
        algorithm_type: params.algorithm_type.clone(),
        is_async: params.is_async,
        block_size,
        min_keysize,
        max_keysize,
        iv_size,
        chunk_size,
        walk_size,
        digest_size,
    }
}
