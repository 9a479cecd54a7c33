pub mod layout;
pub mod types;

pub use layout::{
    CONTAINER_INSTALL_PATH, CONTAINER_ROOT, CONTAINER_SIM_PATH, CONTAINER_SRC_DIR, CONTAINER_USER,
    container_build_dir, container_project_dir,
};
pub use types::*;
