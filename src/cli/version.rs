use trustdao::dao::{SettingKey, MIN_BOOTSTRAP_MEMBERS};

/// Display version information
pub fn execute() {
    println!("trustdao {}", env!("CARGO_PKG_VERSION"));
    println!("Operator CLI for the trusted node DAO");
    println!();
    println!("Bootstrap closes at {} members", MIN_BOOTSTRAP_MEMBERS);
    println!("Genesis settings:");
    for key in SettingKey::ALL {
        println!("  {:<22} {}", key, key.default_value());
    }
}
