// ABOUTME: Defines SMPP v3.4 command identifiers, command status constants,
// ABOUTME: session states and the per-command send gate

use num_enum::TryFromPrimitive;

/// SMPP v3.4 Command Identifiers (Table 4-1)
///
/// The command_id field identifies the SMPP PDU type. Bit 31 is the response
/// indicator: every `*_resp` id is its request id with the top bit set.
/// Reserved ranges of Table 4-1 are rejected on decode.
#[derive(TryFromPrimitive)]
#[repr(u32)]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
pub enum CommandId {
    GenericNack = 0x8000_0000,

    BindReceiver = 0x0000_0001,
    BindReceiverResp = 0x8000_0001,
    BindTransmitter = 0x0000_0002,
    BindTransmitterResp = 0x8000_0002,

    QuerySm = 0x0000_0003,
    QuerySmResp = 0x8000_0003,

    SubmitSm = 0x0000_0004,
    SubmitSmResp = 0x8000_0004,

    DeliverSm = 0x0000_0005,
    DeliverSmResp = 0x8000_0005,

    Unbind = 0x0000_0006,
    UnbindResp = 0x8000_0006,

    ReplaceSm = 0x0000_0007,
    ReplaceSmResp = 0x8000_0007,
    CancelSm = 0x0000_0008,
    CancelSmResp = 0x8000_0008,

    BindTransceiver = 0x0000_0009,
    BindTransceiverResp = 0x8000_0009,

    Outbind = 0x0000_000B,

    EnquireLink = 0x0000_0015,
    EnquireLinkResp = 0x8000_0015,

    SubmitMulti = 0x0000_0021,
    SubmitMultiResp = 0x8000_0021,

    AlertNotification = 0x0000_0102,
    // 0x80000102 is reserved; alert_notification has no response PDU
    DataSm = 0x0000_0103,
    DataSmResp = 0x8000_0103,
}

/// All command ids, used to seed a registry.
pub(crate) const ALL_COMMANDS: &[CommandId] = &[
    CommandId::GenericNack,
    CommandId::BindReceiver,
    CommandId::BindReceiverResp,
    CommandId::BindTransmitter,
    CommandId::BindTransmitterResp,
    CommandId::QuerySm,
    CommandId::QuerySmResp,
    CommandId::SubmitSm,
    CommandId::SubmitSmResp,
    CommandId::DeliverSm,
    CommandId::DeliverSmResp,
    CommandId::Unbind,
    CommandId::UnbindResp,
    CommandId::ReplaceSm,
    CommandId::ReplaceSmResp,
    CommandId::CancelSm,
    CommandId::CancelSmResp,
    CommandId::BindTransceiver,
    CommandId::BindTransceiverResp,
    CommandId::Outbind,
    CommandId::EnquireLink,
    CommandId::EnquireLinkResp,
    CommandId::SubmitMulti,
    CommandId::SubmitMultiResp,
    CommandId::AlertNotification,
    CommandId::DataSm,
    CommandId::DataSmResp,
];

impl CommandId {
    /// Check if this command_id represents a response PDU.
    pub fn is_response(self) -> bool {
        (self as u32) & 0x8000_0000 != 0
    }

    /// The response counterpart of a request id, where one exists.
    pub fn response(self) -> Option<CommandId> {
        if self.is_response() {
            return None;
        }
        CommandId::try_from(self as u32 | 0x8000_0000).ok()
    }

    /// Wire name of the command, as it appears in the protocol specification.
    pub fn name(self) -> &'static str {
        match self {
            CommandId::GenericNack => "generic_nack",
            CommandId::BindReceiver => "bind_receiver",
            CommandId::BindReceiverResp => "bind_receiver_resp",
            CommandId::BindTransmitter => "bind_transmitter",
            CommandId::BindTransmitterResp => "bind_transmitter_resp",
            CommandId::QuerySm => "query_sm",
            CommandId::QuerySmResp => "query_sm_resp",
            CommandId::SubmitSm => "submit_sm",
            CommandId::SubmitSmResp => "submit_sm_resp",
            CommandId::DeliverSm => "deliver_sm",
            CommandId::DeliverSmResp => "deliver_sm_resp",
            CommandId::Unbind => "unbind",
            CommandId::UnbindResp => "unbind_resp",
            CommandId::ReplaceSm => "replace_sm",
            CommandId::ReplaceSmResp => "replace_sm_resp",
            CommandId::CancelSm => "cancel_sm",
            CommandId::CancelSmResp => "cancel_sm_resp",
            CommandId::BindTransceiver => "bind_transceiver",
            CommandId::BindTransceiverResp => "bind_transceiver_resp",
            CommandId::Outbind => "outbind",
            CommandId::EnquireLink => "enquire_link",
            CommandId::EnquireLinkResp => "enquire_link_resp",
            CommandId::SubmitMulti => "submit_multi",
            CommandId::SubmitMultiResp => "submit_multi_resp",
            CommandId::AlertNotification => "alert_notification",
            CommandId::DataSm => "data_sm",
            CommandId::DataSmResp => "data_sm_resp",
        }
    }

    /// Session states from which an ESME may send this command.
    pub fn allowed_states(self) -> &'static [SessionState] {
        use SessionState::*;
        const OPEN_ONLY: &[SessionState] = &[Open];
        const TX: &[SessionState] = &[BoundTx, BoundTrx];
        const RX: &[SessionState] = &[BoundRx, BoundTrx];
        const BOUND: &[SessionState] = &[BoundTx, BoundRx, BoundTrx];

        match self {
            CommandId::BindTransmitter
            | CommandId::BindReceiver
            | CommandId::BindTransceiver
            | CommandId::BindTransmitterResp
            | CommandId::BindReceiverResp
            | CommandId::BindTransceiverResp
            | CommandId::Outbind => OPEN_ONLY,

            CommandId::SubmitSm
            | CommandId::SubmitMulti
            | CommandId::QuerySm
            | CommandId::CancelSm
            | CommandId::ReplaceSm => TX,

            CommandId::DeliverSm
            | CommandId::DeliverSmResp
            | CommandId::AlertNotification => RX,

            CommandId::DataSm
            | CommandId::DataSmResp
            | CommandId::SubmitSmResp
            | CommandId::SubmitMultiResp
            | CommandId::QuerySmResp
            | CommandId::CancelSmResp
            | CommandId::ReplaceSmResp
            | CommandId::EnquireLink
            | CommandId::EnquireLinkResp
            | CommandId::Unbind
            | CommandId::UnbindResp
            | CommandId::GenericNack => BOUND,
        }
    }
}

/// Session state of one ESME-SMSC link.
///
/// A session starts `Closed`, becomes `Open` once the TCP connection is up,
/// and moves to one of the bound states when the corresponding bind response
/// arrives with an ROK status. `unbind_resp` drops it back to `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
    BoundTx,
    BoundRx,
    BoundTrx,
}

/// State entered when the given response arrives with an ROK status.
pub(crate) fn session_transition(id: CommandId) -> Option<SessionState> {
    match id {
        CommandId::BindTransmitterResp => Some(SessionState::BoundTx),
        CommandId::BindReceiverResp => Some(SessionState::BoundRx),
        CommandId::BindTransceiverResp => Some(SessionState::BoundTrx),
        CommandId::UnbindResp => Some(SessionState::Open),
        _ => None,
    }
}

/// SMPP v3.4 command status codes (Section 5.1.3, Table 5-2).
pub mod status {
    pub const ESME_ROK: u32 = 0x0000_0000;
    pub const ESME_RINVMSGLEN: u32 = 0x0000_0001;
    pub const ESME_RINVCMDLEN: u32 = 0x0000_0002;
    pub const ESME_RINVCMDID: u32 = 0x0000_0003;
    pub const ESME_RINVBNDSTS: u32 = 0x0000_0004;
    pub const ESME_RALYBND: u32 = 0x0000_0005;
    pub const ESME_RINVPRTFLG: u32 = 0x0000_0006;
    pub const ESME_RINVREGDLVFLG: u32 = 0x0000_0007;
    pub const ESME_RSYSERR: u32 = 0x0000_0008;
    pub const ESME_RINVSRCADR: u32 = 0x0000_000A;
    pub const ESME_RINVDSTADR: u32 = 0x0000_000B;
    pub const ESME_RINVMSGID: u32 = 0x0000_000C;
    pub const ESME_RBINDFAIL: u32 = 0x0000_000D;
    pub const ESME_RINVPASWD: u32 = 0x0000_000E;
    pub const ESME_RINVSYSID: u32 = 0x0000_000F;
    pub const ESME_RCANCELFAIL: u32 = 0x0000_0011;
    pub const ESME_RREPLACEFAIL: u32 = 0x0000_0013;
    pub const ESME_RMSGQFUL: u32 = 0x0000_0014;
    pub const ESME_RINVSERTYP: u32 = 0x0000_0015;
    pub const ESME_RINVNUMDESTS: u32 = 0x0000_0033;
    pub const ESME_RINVDLNAME: u32 = 0x0000_0034;
    pub const ESME_RINVDESTFLAG: u32 = 0x0000_0040;
    pub const ESME_RINVSUBREP: u32 = 0x0000_0042;
    pub const ESME_RINVESMCLASS: u32 = 0x0000_0043;
    pub const ESME_RCNTSUBDL: u32 = 0x0000_0044;
    pub const ESME_RSUBMITFAIL: u32 = 0x0000_0045;
    pub const ESME_RINVSRCTON: u32 = 0x0000_0048;
    pub const ESME_RINVSRCNPI: u32 = 0x0000_0049;
    pub const ESME_RINVDSTTON: u32 = 0x0000_0050;
    pub const ESME_RINVDSTNPI: u32 = 0x0000_0051;
    pub const ESME_RINVSYSTYP: u32 = 0x0000_0053;
    pub const ESME_RINVREPFLAG: u32 = 0x0000_0054;
    pub const ESME_RINVNUMMSGS: u32 = 0x0000_0055;
    pub const ESME_RTHROTTLED: u32 = 0x0000_0058;
    pub const ESME_RINVSCHED: u32 = 0x0000_0061;
    pub const ESME_RINVEXPIRY: u32 = 0x0000_0062;
    pub const ESME_RINVDFTMSGID: u32 = 0x0000_0063;
    pub const ESME_RX_T_APPN: u32 = 0x0000_0064;
    pub const ESME_RX_P_APPN: u32 = 0x0000_0065;
    pub const ESME_RX_R_APPN: u32 = 0x0000_0066;
    pub const ESME_RQUERYFAIL: u32 = 0x0000_0067;
    pub const ESME_RINVOPTPARSTREAM: u32 = 0x0000_00C0;
    pub const ESME_ROPTPARNOTALLWD: u32 = 0x0000_00C1;
    pub const ESME_RINVPARLEN: u32 = 0x0000_00C2;
    pub const ESME_RMISSINGOPTPARAM: u32 = 0x0000_00C3;
    pub const ESME_RINVOPTPARAMVAL: u32 = 0x0000_00C4;
    pub const ESME_RDELIVERYFAILURE: u32 = 0x0000_00FE;
    pub const ESME_RUNKNOWNERR: u32 = 0x0000_00FF;

    /// Short human-readable description of a status code, for logging.
    pub fn describe(code: u32) -> &'static str {
        match code {
            ESME_ROK => "No Error",
            ESME_RINVMSGLEN => "Message Length is invalid",
            ESME_RINVCMDLEN => "Command Length is invalid",
            ESME_RINVCMDID => "Invalid Command ID",
            ESME_RINVBNDSTS => "Incorrect BIND Status for given command",
            ESME_RALYBND => "ESME Already in Bound State",
            ESME_RINVPRTFLG => "Invalid Priority Flag",
            ESME_RINVREGDLVFLG => "Invalid Registered Delivery Flag",
            ESME_RSYSERR => "System Error",
            ESME_RINVSRCADR => "Invalid Source Address",
            ESME_RINVDSTADR => "Invalid Dest Addr",
            ESME_RINVMSGID => "Message ID is invalid",
            ESME_RBINDFAIL => "Bind Failed",
            ESME_RINVPASWD => "Invalid Password",
            ESME_RINVSYSID => "Invalid System ID",
            ESME_RCANCELFAIL => "Cancel SM Failed",
            ESME_RREPLACEFAIL => "Replace SM Failed",
            ESME_RMSGQFUL => "Message Queue Full",
            ESME_RINVSERTYP => "Invalid Service Type",
            ESME_RINVNUMDESTS => "Invalid number of destinations",
            ESME_RINVDLNAME => "Invalid Distribution List name",
            ESME_RINVDESTFLAG => "Destination flag is invalid",
            ESME_RINVSUBREP => "Invalid submit with replace request",
            ESME_RINVESMCLASS => "Invalid esm_class field data",
            ESME_RCNTSUBDL => "Cannot Submit to Distribution List",
            ESME_RSUBMITFAIL => "submit_sm or submit_multi failed",
            ESME_RINVSRCTON => "Invalid Source address TON",
            ESME_RINVSRCNPI => "Invalid Source address NPI",
            ESME_RINVDSTTON => "Invalid Destination address TON",
            ESME_RINVDSTNPI => "Invalid Destination address NPI",
            ESME_RINVSYSTYP => "Invalid system_type field",
            ESME_RINVREPFLAG => "Invalid replace_if_present flag",
            ESME_RINVNUMMSGS => "Invalid number of messages",
            ESME_RTHROTTLED => "Throttling error",
            ESME_RINVSCHED => "Invalid Scheduled Delivery Time",
            ESME_RINVEXPIRY => "Invalid message validity period",
            ESME_RINVDFTMSGID => "Predefined Message Invalid or Not Found",
            ESME_RX_T_APPN => "ESME Receiver Temporary App Error Code",
            ESME_RX_P_APPN => "ESME Receiver Permanent App Error Code",
            ESME_RX_R_APPN => "ESME Receiver Reject Message Error Code",
            ESME_RQUERYFAIL => "query_sm request failed",
            ESME_RINVOPTPARSTREAM => "Error in the optional part of the PDU Body",
            ESME_ROPTPARNOTALLWD => "Optional Parameter not allowed",
            ESME_RINVPARLEN => "Invalid Parameter Length",
            ESME_RMISSINGOPTPARAM => "Expected Optional Parameter missing",
            ESME_RINVOPTPARAMVAL => "Invalid Optional Parameter Value",
            ESME_RDELIVERYFAILURE => "Delivery Failure",
            ESME_RUNKNOWNERR => "Unknown Error",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_id_is_response() {
        assert!(!CommandId::EnquireLink.is_response());
        assert!(CommandId::EnquireLinkResp.is_response());
        assert!(!CommandId::SubmitSm.is_response());
        assert!(CommandId::SubmitSmResp.is_response());
        assert!(CommandId::GenericNack.is_response());
    }

    #[test]
    fn command_id_response_pairing() {
        assert_eq!(
            CommandId::DeliverSm.response(),
            Some(CommandId::DeliverSmResp)
        );
        assert_eq!(CommandId::Unbind.response(), Some(CommandId::UnbindResp));
        assert_eq!(CommandId::DataSm.response(), Some(CommandId::DataSmResp));
        // alert_notification's response slot is reserved
        assert_eq!(CommandId::AlertNotification.response(), None);
        assert_eq!(CommandId::SubmitSmResp.response(), None);
    }

    #[test]
    fn command_id_round_trips_through_raw_value() {
        for &id in ALL_COMMANDS {
            assert_eq!(CommandId::try_from(id as u32).unwrap(), id);
        }
        assert!(CommandId::try_from(0x0000_000Au32).is_err());
        assert!(CommandId::try_from(0x8000_0102u32).is_err());
    }

    #[test]
    fn send_gate_by_state() {
        use SessionState::*;
        assert!(CommandId::BindTransceiver.allowed_states().contains(&Open));
        assert!(
            !CommandId::BindTransceiver
                .allowed_states()
                .contains(&BoundTrx)
        );
        assert!(CommandId::SubmitSm.allowed_states().contains(&BoundTx));
        assert!(!CommandId::SubmitSm.allowed_states().contains(&BoundRx));
        assert!(!CommandId::SubmitSm.allowed_states().contains(&Open));
        assert!(CommandId::DeliverSmResp.allowed_states().contains(&BoundRx));
        assert!(CommandId::EnquireLink.allowed_states().contains(&BoundRx));
        assert!(!CommandId::EnquireLink.allowed_states().contains(&Closed));
    }

    #[test]
    fn transitions_follow_bind_responses() {
        assert_eq!(
            session_transition(CommandId::BindTransmitterResp),
            Some(SessionState::BoundTx)
        );
        assert_eq!(
            session_transition(CommandId::BindReceiverResp),
            Some(SessionState::BoundRx)
        );
        assert_eq!(
            session_transition(CommandId::BindTransceiverResp),
            Some(SessionState::BoundTrx)
        );
        assert_eq!(
            session_transition(CommandId::UnbindResp),
            Some(SessionState::Open)
        );
        assert_eq!(session_transition(CommandId::SubmitSmResp), None);
    }

    #[test]
    fn status_descriptions() {
        assert_eq!(status::describe(status::ESME_ROK), "No Error");
        assert_eq!(
            status::describe(status::ESME_RINVBNDSTS),
            "Incorrect BIND Status for given command"
        );
        assert_eq!(status::describe(0xDEAD_BEEF), "Unknown");
    }
}
