//! Session tests against an in-process fake SMSC.
//!
//! Each test binds a local TCP listener, drives the server side with the
//! same codec the client uses, and checks the session state machine from
//! both ends of the wire.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use smpp_esme::connection::Connection;
use smpp_esme::{
    BindCredentials, Client, ClientConfig, CommandId, Pdu, PduRegistry, SessionState, SmppError,
    status,
};

fn test_config() -> ClientConfig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    ClientConfig::default().with_read_timeout(Duration::from_millis(500))
}

async fn smsc() -> (TcpListener, std::net::SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Answer one bind request with an ROK response, returning the request.
async fn answer_bind(connection: &mut Connection, registry: &PduRegistry) -> Pdu {
    let request = connection.read_pdu(registry).await.unwrap().unwrap();
    let response_id = request.command_id.response().unwrap();
    let mut response = registry.new_pdu(response_id);
    response.set_str("system_id", "SMSC").unwrap();
    response.sequence_number = request.sequence_number;
    connection.write_pdu(&mut response).await.unwrap();
    request
}

#[tokio::test]
async fn bind_submit_and_unbind_flow() {
    let (listener, addr) = smsc().await;

    let server: JoinHandle<(Pdu, Pdu, Pdu)> = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let registry = PduRegistry::new();
        let mut connection = Connection::new(socket);

        let bind = answer_bind(&mut connection, &registry).await;

        let submit = connection.read_pdu(&registry).await.unwrap().unwrap();
        let mut response = registry.new_pdu(CommandId::SubmitSmResp);
        response.set_str("message_id", "id123").unwrap();
        response.sequence_number = submit.sequence_number;
        connection.write_pdu(&mut response).await.unwrap();

        let unbind = connection.read_pdu(&registry).await.unwrap().unwrap();
        let mut response = registry.new_pdu(CommandId::UnbindResp);
        response.sequence_number = unbind.sequence_number;
        connection.write_pdu(&mut response).await.unwrap();

        (bind, submit, unbind)
    });

    let mut esme = Client::connect(addr, test_config()).await.unwrap();
    assert_eq!(esme.state(), SessionState::Open);

    let response = esme
        .bind_transceiver(&BindCredentials::new("demofoo", "secret!"))
        .await
        .unwrap();
    assert!(response.ok());
    assert_eq!(response.str_param("system_id"), Some("SMSC"));
    assert_eq!(esme.state(), SessionState::BoundTrx);

    let message_id = Arc::new(Mutex::new(None::<String>));
    let seen = Arc::clone(&message_id);
    esme.set_callback(CommandId::SubmitSmResp, move |pdu| {
        *seen.lock().unwrap() = pdu.str_param("message_id").map(str::to_string);
        None
    });

    let mut submit = esme.new_pdu(CommandId::SubmitSm);
    submit.set_str("destination_addr", "4178481818").unwrap();
    submit.set_bytes("short_message", &b"test sms"[..]).unwrap();
    let sent = esme.submit_sm(submit).await.unwrap();
    assert_ne!(sent.sequence_number, 0);

    // submit_sm_resp comes back through the read loop and the callback.
    assert!(esme.read_one_pdu().await.unwrap());
    assert_eq!(message_id.lock().unwrap().as_deref(), Some("id123"));

    esme.unbind().await.unwrap();
    // unbind_resp ends the read loop and drops the session back to open.
    assert!(!esme.read_one_pdu().await.unwrap());
    assert_eq!(esme.state(), SessionState::Open);
    esme.disconnect().await.unwrap();
    assert_eq!(esme.state(), SessionState::Closed);

    let (bind, submit, _) = server.await.unwrap();
    assert_eq!(bind.command_id, CommandId::BindTransceiver);
    assert_eq!(bind.str_param("system_id"), Some("demofoo"));
    assert_eq!(bind.int_param("interface_version"), Some(0x34));
    assert_eq!(
        submit.bytes_param("short_message").map(|b| b.as_ref()),
        Some(&b"test sms"[..])
    );
    assert_eq!(submit.int_param("sm_length"), Some(8));
    assert_eq!(submit.sequence_number, sent.sequence_number);
}

#[tokio::test]
async fn submit_before_bind_is_gated() {
    let (listener, addr) = smsc().await;
    let _server = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
    });

    let mut esme = Client::connect(addr, test_config()).await.unwrap();
    let mut submit = esme.new_pdu(CommandId::SubmitSm);
    submit.set_bytes("short_message", &b"nope"[..]).unwrap();

    match esme.submit_sm(submit).await {
        Err(SmppError::Command(e)) => {
            assert_eq!(e.status, status::ESME_RINVBNDSTS);
        }
        other => panic!("expected a command error, got {other:?}"),
    }
}

#[tokio::test]
async fn enquire_link_is_answered_automatically() {
    let (listener, addr) = smsc().await;

    let server: JoinHandle<Pdu> = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let registry = PduRegistry::new();
        let mut connection = Connection::new(socket);
        answer_bind(&mut connection, &registry).await;

        let mut probe = registry.new_pdu(CommandId::EnquireLink);
        probe.sequence_number = 77;
        connection.write_pdu(&mut probe).await.unwrap();

        connection.read_pdu(&registry).await.unwrap().unwrap()
    });

    let mut esme = Client::connect(addr, test_config()).await.unwrap();
    esme.bind_transmitter(&BindCredentials::new("demofoo", "secret!"))
        .await
        .unwrap();
    assert_eq!(esme.state(), SessionState::BoundTx);

    assert!(esme.read_one_pdu().await.unwrap());

    let response = server.await.unwrap();
    assert_eq!(response.command_id, CommandId::EnquireLinkResp);
    assert_eq!(response.sequence_number, 77);
    assert!(response.ok());
}

#[tokio::test]
async fn deliver_sm_response_uses_callback_status() {
    let (listener, addr) = smsc().await;

    let server: JoinHandle<Pdu> = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let registry = PduRegistry::new();
        let mut connection = Connection::new(socket);
        answer_bind(&mut connection, &registry).await;

        let mut deliver = registry.new_pdu(CommandId::DeliverSm);
        deliver.set_str("source_addr", "41791234567").unwrap();
        deliver.set_bytes("short_message", &b"mo message"[..]).unwrap();
        deliver.sequence_number = 9;
        connection.write_pdu(&mut deliver).await.unwrap();

        connection.read_pdu(&registry).await.unwrap().unwrap()
    });

    let mut esme = Client::connect(addr, test_config()).await.unwrap();
    esme.bind_receiver(&BindCredentials::new("demofoo", "secret!"))
        .await
        .unwrap();
    assert_eq!(esme.state(), SessionState::BoundRx);

    let received = Arc::new(Mutex::new(None::<Vec<u8>>));
    let seen = Arc::clone(&received);
    esme.set_callback(CommandId::DeliverSm, move |pdu| {
        *seen.lock().unwrap() = pdu.bytes_param("short_message").map(|b| b.to_vec());
        Some(status::ESME_RX_T_APPN)
    });

    assert!(esme.read_one_pdu().await.unwrap());
    assert_eq!(received.lock().unwrap().as_deref(), Some(&b"mo message"[..]));

    let response = server.await.unwrap();
    assert_eq!(response.command_id, CommandId::DeliverSmResp);
    assert_eq!(response.sequence_number, 9);
    assert_eq!(response.command_status, status::ESME_RX_T_APPN);
}

#[tokio::test]
async fn peer_unbind_is_answered_and_ends_the_loop() {
    let (listener, addr) = smsc().await;

    let server: JoinHandle<Pdu> = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let registry = PduRegistry::new();
        let mut connection = Connection::new(socket);
        answer_bind(&mut connection, &registry).await;

        let mut unbind = registry.new_pdu(CommandId::Unbind);
        unbind.sequence_number = 5;
        connection.write_pdu(&mut unbind).await.unwrap();

        connection.read_pdu(&registry).await.unwrap().unwrap()
    });

    let mut esme = Client::connect(addr, test_config()).await.unwrap();
    esme.bind_transceiver(&BindCredentials::new("demofoo", "secret!"))
        .await
        .unwrap();

    assert!(!esme.read_one_pdu().await.unwrap());

    let response = server.await.unwrap();
    assert_eq!(response.command_id, CommandId::UnbindResp);
    assert_eq!(response.sequence_number, 5);
    assert!(response.ok());
}

#[tokio::test]
async fn idle_link_triggers_enquire_link() {
    let (listener, addr) = smsc().await;

    let server: JoinHandle<Pdu> = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let registry = PduRegistry::new();
        let mut connection = Connection::new(socket);
        answer_bind(&mut connection, &registry).await;

        // Stay silent; the client's keepalive should probe the link.
        let probe = connection.read_pdu(&registry).await.unwrap().unwrap();
        let mut response = registry.new_pdu(CommandId::EnquireLinkResp);
        response.sequence_number = probe.sequence_number;
        connection.write_pdu(&mut response).await.unwrap();
        probe
    });

    let config = ClientConfig::default()
        .with_read_timeout(Duration::from_millis(200))
        .with_enquire_link_interval(Duration::from_millis(100));
    let mut esme = Client::connect(addr, config).await.unwrap();
    esme.bind_transceiver(&BindCredentials::new("demofoo", "secret!"))
        .await
        .unwrap();

    // First read times out and, with the idle threshold passed, probes.
    assert!(esme.read_one_pdu().await.unwrap());
    // Second read picks up the enquire_link_resp.
    assert!(esme.read_one_pdu().await.unwrap());

    let probe = server.await.unwrap();
    assert_eq!(probe.command_id, CommandId::EnquireLink);
    assert!(probe.sequence_number > 0);
}

#[tokio::test]
async fn bind_rejection_is_a_command_error() {
    let (listener, addr) = smsc().await;

    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let registry = PduRegistry::new();
        let mut connection = Connection::new(socket);

        let request = connection.read_pdu(&registry).await.unwrap().unwrap();
        let mut response = registry.new_pdu(CommandId::BindTransceiverResp);
        response.command_status = status::ESME_RINVPASWD;
        response.sequence_number = request.sequence_number;
        connection.write_pdu(&mut response).await.unwrap();
    });

    let mut esme = Client::connect(addr, test_config()).await.unwrap();
    match esme
        .bind_transceiver(&BindCredentials::new("demofoo", "wrong"))
        .await
    {
        Err(SmppError::Command(e)) => {
            assert_eq!(e.status, status::ESME_RINVPASWD);
            assert_eq!(esme.state(), SessionState::Open);
        }
        other => panic!("expected a command error, got {other:?}"),
    }
}
