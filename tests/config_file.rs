//! The shipped settings file stays in sync with the built-in defaults

use cube_dice_roller::config::RollerConfig;
use cube_dice_roller::utils::constants::game_constants::CONFIG_PATH;

#[test]
fn test_shipped_config_matches_defaults() {
    let config = RollerConfig::load(CONFIG_PATH).unwrap();
    assert_eq!(config, RollerConfig::default());
}
