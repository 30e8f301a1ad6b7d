use vergen::{
    vergen,
    Config,
};

fn main() {
    vergen(Config::default()).unwrap_or_else(|e| {
        println!("cargo:warning=build metadata unavailable: {}", e);
    });
}
