//! Network config controller — use-cases of the configuration page.

use somfyctl_domain::network::Network;
use somfyctl_domain::system::SystemInfos;

use crate::gateway::GatewayApi;
use crate::model::forms::{MqttForm, WifiForm};
use crate::ports::{ClientError, HttpTransport};
use crate::ui_event::ConfigEvent;

/// Drives the configuration page: scanned networks, the Wi-Fi and MQTT
/// forms, system infos and restart.
pub struct NetworkConfigController<T> {
    api: GatewayApi<T>,
    networks: Vec<Network>,
    wifi: WifiForm,
    mqtt: MqttForm,
    infos: Option<SystemInfos>,
}

impl<T: HttpTransport> NetworkConfigController<T> {
    pub fn new(api: GatewayApi<T>) -> Self {
        Self {
            api,
            networks: Vec::new(),
            wifi: WifiForm::default(),
            mqtt: MqttForm::default(),
            infos: None,
        }
    }

    #[must_use]
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    #[must_use]
    pub fn wifi(&self) -> &WifiForm {
        &self.wifi
    }

    /// Mutable access for field edits.
    pub fn wifi_mut(&mut self) -> &mut WifiForm {
        &mut self.wifi
    }

    #[must_use]
    pub fn mqtt(&self) -> &MqttForm {
        &self.mqtt
    }

    /// Mutable access for field edits.
    pub fn mqtt_mut(&mut self) -> &mut MqttForm {
        &mut self.mqtt
    }

    #[must_use]
    pub fn infos(&self) -> Option<&SystemInfos> {
        self.infos.as_ref()
    }

    /// Fetch the scan results and replace the network list.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the list is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load_networks(&mut self) -> Result<&[Network], ClientError> {
        let networks = self.api.list_networks().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load networks");
        })?;
        tracing::debug!(count = networks.len(), "networks loaded");
        self.networks = networks;
        Ok(&self.networks)
    }

    /// Copy the ssid of the network at `index` into the Wi-Fi form.
    ///
    /// Returns the selected network, or `None` for an out-of-range index.
    pub fn select_network(&mut self, index: usize) -> Option<&Network> {
        let network = self.networks.get(index)?;
        self.wifi.select(network);
        Some(network)
    }

    /// Prefill the Wi-Fi ssid with the one stored on the gateway.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the form is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load_wifi_config(&mut self) -> Result<(), ClientError> {
        let config = self.api.wifi_config().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load wifi config");
        })?;
        self.wifi.prefill(&config);
        Ok(())
    }

    /// Fill the MQTT form from the gateway.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the form is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load_mqtt_config(&mut self) -> Result<(), ClientError> {
        let config = self.api.mqtt_config().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load mqtt config");
        })?;
        self.mqtt.apply(&config);
        Ok(())
    }

    /// Fetch the gateway version and network identity.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    #[tracing::instrument(skip(self))]
    pub async fn load_system_infos(&mut self) -> Result<&SystemInfos, ClientError> {
        let infos = self.api.system_infos().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load system infos");
        })?;
        Ok(self.infos.insert(infos))
    }

    /// Send the Wi-Fi form as is.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    #[tracing::instrument(skip(self), fields(ssid = %self.wifi.ssid))]
    pub async fn submit_wifi(&self) -> Result<(), ClientError> {
        self.api
            .update_wifi_config(&self.wifi)
            .await
            .inspect(|()| tracing::info!("wifi config submitted"))
            .inspect_err(|err| tracing::warn!(error = %err, "failed to submit wifi config"))
    }

    /// Send the MQTT form as is.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    #[tracing::instrument(skip(self), fields(broker = %self.mqtt.broker))]
    pub async fn submit_mqtt(&self) -> Result<(), ClientError> {
        self.api
            .update_mqtt_config(&self.mqtt)
            .await
            .inspect(|()| tracing::info!("mqtt config submitted"))
            .inspect_err(|err| tracing::warn!(error = %err, "failed to submit mqtt config"))
    }

    /// Ask the gateway to restart.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    #[tracing::instrument(skip(self))]
    pub async fn restart(&self) -> Result<(), ClientError> {
        self.api
            .restart()
            .await
            .inspect(|()| tracing::info!("restart requested"))
            .inspect_err(|err| tracing::warn!(error = %err, "failed to request restart"))
    }

    /// Run every page-load fetch, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.load_networks().await?;
        self.load_wifi_config().await?;
        self.load_mqtt_config().await?;
        self.load_system_infos().await?;
        Ok(())
    }

    /// Route a page event to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns the failure of the operation the event triggered.
    pub async fn handle(&mut self, event: ConfigEvent) -> Result<(), ClientError> {
        match event {
            ConfigEvent::Load => self.load().await,
            ConfigEvent::NetworkSelected { index } => {
                if self.select_network(index).is_none() {
                    tracing::debug!(index, "ignoring selection of unknown network");
                }
                Ok(())
            }
            ConfigEvent::WifiSubmitted => self.submit_wifi().await,
            ConfigEvent::MqttSubmitted => self.submit_mqtt().await,
            ConfigEvent::RestartClicked => self.restart().await,
        }
    }
}
