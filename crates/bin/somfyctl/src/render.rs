//! Plain-text rendering of gateway data for the terminal.

use std::fmt::Write;

use somfyctl_app::model::MqttForm;
use somfyctl_domain::network::Network;
use somfyctl_domain::remote::Remote;
use somfyctl_domain::system::SystemInfos;

const UNKNOWN: &str = "-";

/// One line per remote: id, rolling code and name.
#[must_use]
pub fn remotes(rows: &[Remote]) -> String {
    if rows.is_empty() {
        return "no remote\n".to_string();
    }
    let mut out = format!("{:>6}  {:>8}  NAME\n", "ID", "CODE");
    for remote in rows {
        let _ = writeln!(
            out,
            "{:>6}  {:>8}  {}",
            remote.id, remote.rolling_code, remote.name
        );
    }
    out
}

/// Numbered scan results, the number being what `wifi set --network` takes.
#[must_use]
pub fn networks(networks: &[Network]) -> String {
    let mut out = String::new();
    for (index, network) in networks.iter().enumerate() {
        let _ = writeln!(out, "{index:>3}  {:>8}  {}", network.signal_label(), network.ssid);
    }
    out
}

/// The MQTT form, password hidden.
#[must_use]
pub fn mqtt(form: &MqttForm) -> String {
    let password = if form.password.is_empty() { "" } else { "********" };
    format!(
        "enabled:  {}\nbroker:   {}\nport:     {}\nusername: {}\npassword: {password}\n",
        form.enabled, form.broker, form.port, form.username
    )
}

#[must_use]
pub fn system_infos(infos: &SystemInfos) -> String {
    format!(
        "version:     {}\nmac address: {}\nip address:  {}\n",
        infos.version.as_deref().unwrap_or(UNKNOWN),
        infos.mac_address.as_deref().unwrap_or(UNKNOWN),
        infos.ip_address.as_deref().unwrap_or(UNKNOWN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use somfyctl_domain::id::RemoteId;
    use somfyctl_domain::remote::RollingCode;

    #[test]
    fn should_render_remote_rows_in_order() {
        let rows = vec![
            Remote::new(RemoteId::new(1), "Kitchen", RollingCode::new(12)),
            Remote::new(RemoteId::new(2), "Bedroom", RollingCode::ZERO),
        ];
        let out = remotes(&rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "     1        12  Kitchen");
        assert_eq!(lines[2], "     2         0  Bedroom");
    }

    #[test]
    fn should_say_when_there_is_no_remote() {
        assert_eq!(remotes(&[]), "no remote\n");
    }

    #[test]
    fn should_number_networks_from_zero() {
        let out = networks(&[Network {
            ssid: "home-net".to_string(),
            rssi: -48,
        }]);
        assert_eq!(out, "  0   -48 dBm  home-net\n");
    }

    #[test]
    fn should_hide_mqtt_password() {
        let form = MqttForm {
            password: "pw".to_string(),
            ..MqttForm::default()
        };
        assert!(!mqtt(&form).contains("pw\n"));
    }

    #[test]
    fn should_show_dash_for_missing_infos() {
        let out = system_infos(&SystemInfos {
            version: Some("2.1.1".to_string()),
            ..SystemInfos::default()
        });
        assert!(out.contains("version:     2.1.1"));
        assert!(out.contains("ip address:  -"));
    }
}
