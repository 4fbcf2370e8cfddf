//! Unit tests for the deploy application service.
//!
//! Drives the configuration interpreter and the device session state
//! machine through a recording executor, asserting on the exact
//! device-level command sequences they issue.

#![allow(clippy::expect_used)]

use plexus_cli::application::services::deploy::{
    apply_config, deploy_desired_state, deploy_with_session, DeviceSession,
};
use plexus_cli::domain::device::{Device, DeviceKind};
use plexus_cli::domain::error::DeviceError;
use plexus_common::state::DesiredState;

use crate::mocks::{NoopReporter, RecordingExecutor};

const HOST_CONFIG: &str = "\
# Configuration for h1 (host)
hostname h1
interface eth0
 ip address 10.0.1.10 255.255.255.0
ip route 10.0.2.0/24 10.0.1.1
";

fn connected_device(name: &str, kind: DeviceKind) -> Device {
    let mut device = Device::new(name, kind, Some(name.to_string()));
    device.connect().expect("connect");
    device
}

#[tokio::test]
async fn test_apply_config_issues_expected_command_sequence() {
    let executor = RecordingExecutor::new().respond("ip addr show", "inet 10.0.1.10/24");
    let mut device = connected_device("h1", DeviceKind::Host);

    let count = apply_config(&executor, &mut device, HOST_CONFIG)
        .await
        .expect("apply");
    assert_eq!(count, 4); // comment dropped, 4 directives processed

    let commands = executor.commands_for("h1");
    assert_eq!(
        commands,
        [
            "hostname h1",
            "ip addr flush dev h1-eth0",
            "ip addr add 10.0.1.10/24 dev h1-eth0",
            "ip link set h1-eth0 up",
            "ip addr show h1-eth0",
            "ip route del 10.0.2.0/24 via 10.0.1.1",
            "ip route add 10.0.2.0/24 via 10.0.1.1",
        ]
    );
}

#[tokio::test]
async fn test_apply_config_records_history_and_pending() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("h1", DeviceKind::Host);

    apply_config(&executor, &mut device, HOST_CONFIG)
        .await
        .expect("apply");

    assert_eq!(device.applied_config().len(), 4);
    assert_eq!(device.applied_config()[0], "hostname h1");
    assert!(device.has_pending_config());
}

#[tokio::test]
async fn test_switch_interface_numbering_and_sysctls() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("s1", DeviceKind::Switch);

    let config = "interface eth0\n ip address 10.0.1.1 255.255.255.0\n";
    apply_config(&executor, &mut device, config)
        .await
        .expect("apply");

    let commands = executor.commands_for("s1");
    // Context eth0 on a switch resolves to physical port 1.
    assert!(commands.contains(&"ip addr add 10.0.1.1/24 dev s1-eth1".to_string()));
    assert!(commands.contains(&"sysctl -w net.ipv4.ip_forward=1".to_string()));
    assert!(
        commands.contains(&"echo 1 > /proc/sys/net/ipv4/conf/s1-eth1/proxy_arp".to_string())
    );
    assert!(
        commands.contains(&"echo 1 > /proc/sys/net/ipv4/conf/s1-eth1/arp_ignore".to_string())
    );
    assert!(
        commands.contains(&"echo 2 > /proc/sys/net/ipv4/conf/s1-eth1/arp_announce".to_string())
    );
}

#[tokio::test]
async fn test_switch_address_without_interface_context_uses_first_port() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("s1", DeviceKind::Switch);

    apply_config(&executor, &mut device, "ip address 10.0.1.1\n")
        .await
        .expect("apply");

    let commands = executor.commands_for("s1");
    assert!(commands.contains(&"ip addr add 10.0.1.1/24 dev s1-eth1".to_string()));
}

#[tokio::test]
async fn test_host_address_without_mask_defaults_to_slash_24() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("h1", DeviceKind::Host);

    apply_config(&executor, &mut device, " ip address 10.0.1.10\n")
        .await
        .expect("apply");

    let commands = executor.commands_for("h1");
    assert!(commands.contains(&"ip addr add 10.0.1.10/24 dev h1-eth0".to_string()));
}

#[tokio::test]
async fn test_route_without_prefix_is_normalized() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("h1", DeviceKind::Host);

    apply_config(&executor, &mut device, "ip route 10.0.2.0 10.0.1.1\n")
        .await
        .expect("apply");

    let commands = executor.commands_for("h1");
    assert!(commands.contains(&"ip route add 10.0.2.0/24 via 10.0.1.1".to_string()));
}

#[tokio::test]
async fn test_unknown_line_is_ignored_but_counted() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("h1", DeviceKind::Host);

    let with_unknown = "hostname h1\nbanner motd foo\nip route 10.0.2.0/24 10.0.1.1\n";
    let count = apply_config(&executor, &mut device, with_unknown)
        .await
        .expect("apply");

    // The unknown line issues nothing but still counts toward the pass.
    assert_eq!(count, 3);
    let commands = executor.commands_for("h1");
    assert!(commands.contains(&"hostname h1".to_string()));
    assert!(commands.contains(&"ip route add 10.0.2.0/24 via 10.0.1.1".to_string()));
    assert!(!commands.iter().any(|c| c.contains("banner")));
}

#[tokio::test]
async fn test_per_line_failure_does_not_abort_the_pass() {
    // The hostname command fails; every later line must still be applied
    // and the call still reports the full line count.
    let executor = RecordingExecutor::new().fail_on("hostname");
    let mut device = connected_device("h1", DeviceKind::Host);

    let count = apply_config(&executor, &mut device, HOST_CONFIG)
        .await
        .expect("apply");
    assert_eq!(count, 4);

    let commands = executor.commands_for("h1");
    assert!(commands.contains(&"ip route add 10.0.2.0/24 via 10.0.1.1".to_string()));
    assert!(device.has_pending_config());
}

#[tokio::test]
async fn test_mid_address_failure_skips_rest_of_that_line_only() {
    // Flushing fails, so the whole ip-address line is abandoned, but the
    // route on the following line still goes through.
    let executor = RecordingExecutor::new().fail_on("ip addr flush");
    let mut device = connected_device("h1", DeviceKind::Host);

    let config = " ip address 10.0.1.10\nip route 10.0.2.0/24 10.0.1.1\n";
    let count = apply_config(&executor, &mut device, config)
        .await
        .expect("apply");
    assert_eq!(count, 2);

    let commands = executor.commands_for("h1");
    assert!(!commands.iter().any(|c| c.starts_with("ip addr add")));
    assert!(commands.contains(&"ip route add 10.0.2.0/24 via 10.0.1.1".to_string()));
}

#[tokio::test]
async fn test_verification_miss_is_not_fatal() {
    let executor = RecordingExecutor::new().respond("ip addr show", "no addresses here");
    let mut device = connected_device("h1", DeviceKind::Host);

    let count = apply_config(&executor, &mut device, " ip address 10.0.1.10\n")
        .await
        .expect("verification miss is a warning only");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_apply_config_requires_connection() {
    let executor = RecordingExecutor::new();
    let mut device = Device::new("h1", DeviceKind::Host, Some("h1".to_string()));

    let err = apply_config(&executor, &mut device, HOST_CONFIG)
        .await
        .expect_err("not connected");
    assert!(matches!(err, DeviceError::NotConnected(_)));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_interface_context_resets_between_passes() {
    let executor = RecordingExecutor::new();
    let mut device = connected_device("h1", DeviceKind::Host);

    apply_config(&executor, &mut device, "interface eth1\n ip address 10.0.1.10\n")
        .await
        .expect("first pass");
    // Second pass has no interface line: the context from the first pass
    // must not leak in — the address lands on eth0, not eth1.
    apply_config(&executor, &mut device, " ip address 10.0.9.9\n")
        .await
        .expect("second pass");

    let commands = executor.commands_for("h1");
    assert!(commands.contains(&"ip addr add 10.0.1.10/24 dev h1-eth1".to_string()));
    assert!(commands.contains(&"ip addr add 10.0.9.9/24 dev h1-eth0".to_string()));
}

// ── Session state machine ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_deploy_requires_connect() {
    let executor = RecordingExecutor::new();
    let mut device = Device::new("h1", DeviceKind::Host, Some("h1".to_string()));
    let mut session = DeviceSession::new(&mut device);

    let err = session
        .deploy(&executor, HOST_CONFIG, true)
        .await
        .expect_err("not connected");
    assert!(matches!(err, DeviceError::NotConnected(_)));
}

#[tokio::test]
async fn test_session_deploy_with_commit_clears_pending() {
    let executor = RecordingExecutor::new();
    let mut device = Device::new("h1", DeviceKind::Host, Some("h1".to_string()));
    let mut session = DeviceSession::new(&mut device);

    session.connect().expect("connect");
    let count = session
        .deploy(&executor, HOST_CONFIG, true)
        .await
        .expect("deploy");
    assert_eq!(count, 4);
    session.disconnect();

    assert!(!device.has_pending_config());
    assert!(!device.is_connected());
}

#[tokio::test]
async fn test_session_deploy_without_commit_leaves_pending() {
    let executor = RecordingExecutor::new();
    let mut device = Device::new("h1", DeviceKind::Host, Some("h1".to_string()));
    let mut session = DeviceSession::new(&mut device);

    session.connect().expect("connect");
    session
        .deploy(&executor, HOST_CONFIG, false)
        .await
        .expect("deploy");
    session.disconnect();

    assert!(device.has_pending_config());
}

#[tokio::test]
async fn test_deploy_with_session_always_disconnects() {
    let executor = RecordingExecutor::new();
    let mut device = Device::new("h1", DeviceKind::Host, Some("h1".to_string()));

    deploy_with_session(&executor, &mut device, HOST_CONFIG, true)
        .await
        .expect("deploy");
    assert!(!device.is_connected());
}

#[tokio::test]
async fn test_deploy_with_session_connect_failure_surfaces() {
    let executor = RecordingExecutor::new();
    let mut device = Device::new("h1", DeviceKind::Host, None);

    let err = deploy_with_session(&executor, &mut device, HOST_CONFIG, true)
        .await
        .expect_err("no node handle");
    assert!(matches!(err, DeviceError::NoNodeHandle(_)));
}

// ── Desired-state deployment ──────────────────────────────────────────────────

const STATE_YAML: &str = "\
topology:
  nodes:
    - name: s1
      type: switch
    - name: h1
      type: host
  links:
    - from: h1
      to: s1
devices:
  s1:
    type: switch
    interfaces:
      - name: eth0
        ip: 10.0.1.1
        netmask: 255.255.255.0
  h1:
    type: host
    interfaces:
      - name: eth0
        ip: 10.0.1.10
    routes:
      - network: 10.0.2.0/24
        next_hop: 10.0.1.1
";

#[tokio::test]
async fn test_deploy_desired_state_configures_every_device() {
    let state: DesiredState = serde_yaml::from_str(STATE_YAML).expect("state parses");
    let executor = RecordingExecutor::new();

    let deployments = deploy_desired_state(&executor, &NoopReporter, &state)
        .await
        .expect("deploy");

    assert_eq!(deployments.len(), 2);
    // Devices deploy in name order: h1 first, then s1.
    assert_eq!(deployments[0].device, "h1");
    assert_eq!(deployments[0].commands, 4); // hostname, interface, address, route
    assert_eq!(deployments[1].device, "s1");
    assert_eq!(deployments[1].commands, 3); // hostname, interface, address

    // Switch address went to the incremented port, host to port 0.
    assert!(
        executor
            .commands_for("s1")
            .contains(&"ip addr add 10.0.1.1/24 dev s1-eth1".to_string())
    );
    assert!(
        executor
            .commands_for("h1")
            .contains(&"ip addr add 10.0.1.10/24 dev h1-eth0".to_string())
    );
}

#[tokio::test]
async fn test_deploy_desired_state_rejects_invalid_document() {
    let yaml = "\
topology:
  nodes: []
  links: []
devices: {}
";
    let state: DesiredState = serde_yaml::from_str(yaml).expect("parses");
    let executor = RecordingExecutor::new();

    let result = deploy_desired_state(&executor, &NoopReporter, &state).await;
    assert!(result.is_err());
    assert!(executor.calls().is_empty());
}
