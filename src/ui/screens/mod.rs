pub mod backups;
pub mod form;
pub mod help;
pub mod optimizer;
pub mod profiles;
pub mod quick_settings;
pub mod settings;
