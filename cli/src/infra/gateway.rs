//! Runtime-selected `ApplicationGateway`.
//!
//! The port uses `async fn` and is not object safe, so the transport chosen
//! by configuration is carried as an enum that delegates to the concrete type.

use anyhow::Result;

use crate::application::ports::ApplicationGateway;
use crate::domain::{ApplicationSnapshot, GatewayKind, ScaleoverConfig};
use crate::infra::cf_cli::CfCliGateway;
#[cfg(feature = "api-gateway")]
use crate::infra::cloud_controller::CloudControllerGateway;
use crate::infra::command_runner::TokioCommandRunner;

/// The control-plane transport for one process run.
pub enum ControlPlane {
    Cli(CfCliGateway<TokioCommandRunner>),
    #[cfg(feature = "api-gateway")]
    Api(CloudControllerGateway),
}

impl ControlPlane {
    /// Build the transport named by `config.gateway`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API transport is selected but the cf session
    /// cannot be loaded, or the binary was built without it.
    pub fn from_config(config: &ScaleoverConfig) -> Result<Self> {
        match config.gateway {
            GatewayKind::Cli => {
                let runner = TokioCommandRunner::new(config.command_timeout());
                Ok(Self::Cli(CfCliGateway::new(runner, config.cf_binary.clone())))
            }
            GatewayKind::Api => Self::api(config),
        }
    }

    #[cfg(feature = "api-gateway")]
    fn api(config: &ScaleoverConfig) -> Result<Self> {
        use crate::infra::cf_config;

        let home = cf_config::cf_home(config.cf_home.as_deref())?;
        let session = cf_config::load_session(&home)?;
        tracing::debug!(api = %session.target, space = %session.space.name, "using Cloud Controller API");
        Ok(Self::Api(CloudControllerGateway::new(
            &session,
            config.request_timeout(),
        )?))
    }

    #[cfg(not(feature = "api-gateway"))]
    fn api(_config: &ScaleoverConfig) -> Result<Self> {
        anyhow::bail!("this build of scaleover does not include the API gateway; use --gateway cli")
    }
}

impl ApplicationGateway for ControlPlane {
    async fn fetch_application(&self, name: &str) -> Result<ApplicationSnapshot> {
        match self {
            Self::Cli(gw) => gw.fetch_application(name).await,
            #[cfg(feature = "api-gateway")]
            Self::Api(gw) => gw.fetch_application(name).await,
        }
    }

    async fn set_instance_count(&self, name: &str, count: u32) -> Result<()> {
        match self {
            Self::Cli(gw) => gw.set_instance_count(name, count).await,
            #[cfg(feature = "api-gateway")]
            Self::Api(gw) => gw.set_instance_count(name, count).await,
        }
    }

    async fn start(&self, name: &str) -> Result<()> {
        match self {
            Self::Cli(gw) => gw.start(name).await,
            #[cfg(feature = "api-gateway")]
            Self::Api(gw) => gw.start(name).await,
        }
    }

    async fn stop(&self, name: &str) -> Result<()> {
        match self {
            Self::Cli(gw) => gw.stop(name).await,
            #[cfg(feature = "api-gateway")]
            Self::Api(gw) => gw.stop(name).await,
        }
    }
}
