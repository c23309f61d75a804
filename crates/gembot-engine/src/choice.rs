//! Two-tier resolution of choice codes
//!
//! Fixed menu commands are matched first, then useful activities, then
//! rewards. Anything left over is unknown.

use gembot_catalog::Catalogs;
use gembot_types::{CatalogEntry, MenuCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Menu(MenuCommand),
    UsefulActivity(CatalogEntry),
    Reward(CatalogEntry),
    Unknown(String),
}

impl Choice {
    pub fn resolve(code: &str, catalogs: &Catalogs) -> Self {
        if let Ok(command) = code.parse::<MenuCommand>() {
            return Choice::Menu(command);
        }
        if let Some(entry) = catalogs.useful_activities.find(code) {
            return Choice::UsefulActivity(entry.clone());
        }
        if let Some(entry) = catalogs.rewards.find(code) {
            return Choice::Reward(entry.clone());
        }
        Choice::Unknown(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_tiers() {
        let catalogs = Catalogs::builtin();

        assert_eq!(
            Choice::resolve("show_balance", &catalogs),
            Choice::Menu(MenuCommand::ShowBalance)
        );
        assert!(matches!(
            Choice::resolve("yoga", &catalogs),
            Choice::UsefulActivity(ref e) if e.code == "yoga"
        ));
        assert!(matches!(
            Choice::resolve("eat_sweets", &catalogs),
            Choice::Reward(ref e) if e.gems.value() == 60
        ));
        assert_eq!(
            Choice::resolve("xyz", &catalogs),
            Choice::Unknown("xyz".to_string())
        );
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        let catalogs = Catalogs::builtin();
        assert!(matches!(Choice::resolve("YOGA", &catalogs), Choice::Unknown(_)));
    }
}
