//! `config.cache` consumed by FairSoft's `configure.sh`.

use oxy_common::CONTAINER_SIM_PATH;

/// File name of the generated config, written next to the checkouts in `src/`.
pub const FAIRSOFT_CONFIG_FILE: &str = "config.cache";

/// Answers to the FairSoft configure script, rendered as `key=value` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairSoftConfig {
    pub compiler: String,
    pub debug: bool,
    pub optimize: bool,
    pub geant4_download_install_data_automatic: bool,
    pub geant4_install_data_from_dir: bool,
    pub build_root6: bool,
    pub build_python: bool,
    pub install_sim: bool,
    /// Install location of the externals, as seen inside the container.
    pub simpath_install: String,
    pub platform: String,
}

impl Default for FairSoftConfig {
    fn default() -> Self {
        Self {
            compiler: "gcc".to_string(),
            debug: false,
            optimize: true,
            geant4_download_install_data_automatic: false,
            geant4_install_data_from_dir: false,
            build_root6: true,
            build_python: true,
            install_sim: true,
            simpath_install: CONTAINER_SIM_PATH.to_string(),
            platform: "linux".to_string(),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl FairSoftConfig {
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "## config for FairRoot externals\n\
             compiler={}\n\
             debug={}\n\
             optimize={}\n\
             geant4_download_install_data_automatic={}\n\
             geant4_install_data_from_dir={}\n\
             build_root6={}\n\
             build_python={}\n\
             install_sim={}\n\
             SIMPATH_INSTALL={}\n\
             platform={}\n",
            self.compiler,
            yes_no(self.debug),
            yes_no(self.optimize),
            yes_no(self.geant4_download_install_data_automatic),
            yes_no(self.geant4_install_data_from_dir),
            yes_no(self.build_root6),
            yes_no(self.build_python),
            yes_no(self.install_sim),
            self.simpath_install,
            self.platform,
        )
    }
}
