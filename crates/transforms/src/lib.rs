pub mod allow_list;
pub mod delete_undefined;

pub use delete_undefined::{
    run_delete_undefined, DeleteUndefinedConfig, DeleteUndefinedStats, SubstPolicy,
};
