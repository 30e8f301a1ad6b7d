macro_rules! env_or_none {
    ($name:ident, $env:literal) => {
        pub const $name: &str = match option_env!($env) {
            Some(value) => value,
            None => "<none>",
        };
    };
}

pub const PACKAGE: &str = "offboard";
env_or_none!(VERSION, "VERGEN_BUILD_SEMVER");
env_or_none!(COMMIT_HASH, "VERGEN_GIT_SHA");
env_or_none!(BUILD_TIMESTAMP, "VERGEN_BUILD_TIMESTAMP");
env_or_none!(RUSTC_SEMVER, "VERGEN_RUSTC_SEMVER");
env_or_none!(RUSTC_COMMIT_HASH, "VERGEN_RUSTC_COMMIT_HASH");

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn never_empty() {
        for value in [VERSION, COMMIT_HASH, BUILD_TIMESTAMP, RUSTC_SEMVER, RUSTC_COMMIT_HASH] {
            assert!(!value.is_empty());
        }
    }
}
