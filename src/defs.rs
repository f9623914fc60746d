//! Declarative schemas for every SMPP v3.4 command.
//!
//! Each command id maps to an ordered list of mandatory parameter
//! declarations plus the set of optional (TLV) tags it accepts. Commands that
//! share a layout on the wire (the three bind variants, submit_sm and
//! deliver_sm) point at the same table.

use crate::command::CommandId;
use crate::params::{ParamSpec, TlvDef};

/// Standard optional parameter tags (Table 5-1).
pub mod tags {
    pub const DEST_ADDR_SUBUNIT: u16 = 0x0005;
    pub const DEST_NETWORK_TYPE: u16 = 0x0006;
    pub const DEST_BEARER_TYPE: u16 = 0x0007;
    pub const DEST_TELEMATICS_ID: u16 = 0x0008;
    pub const SOURCE_ADDR_SUBUNIT: u16 = 0x000D;
    pub const SOURCE_NETWORK_TYPE: u16 = 0x000E;
    pub const SOURCE_BEARER_TYPE: u16 = 0x000F;
    pub const SOURCE_TELEMATICS_ID: u16 = 0x0010;
    pub const QOS_TIME_TO_LIVE: u16 = 0x0017;
    pub const PAYLOAD_TYPE: u16 = 0x0019;
    pub const ADDITIONAL_STATUS_INFO_TEXT: u16 = 0x001D;
    pub const RECEIPTED_MESSAGE_ID: u16 = 0x001E;
    pub const MS_MSG_WAIT_FACILITIES: u16 = 0x0030;
    pub const PRIVACY_INDICATOR: u16 = 0x0201;
    pub const SOURCE_SUBADDRESS: u16 = 0x0202;
    pub const DEST_SUBADDRESS: u16 = 0x0203;
    pub const USER_MESSAGE_REFERENCE: u16 = 0x0204;
    pub const USER_RESPONSE_CODE: u16 = 0x0205;
    pub const SOURCE_PORT: u16 = 0x020A;
    pub const DESTINATION_PORT: u16 = 0x020B;
    pub const SAR_MSG_REF_NUM: u16 = 0x020C;
    pub const LANGUAGE_INDICATOR: u16 = 0x020D;
    pub const SAR_TOTAL_SEGMENTS: u16 = 0x020E;
    pub const SAR_SEGMENT_SEQNUM: u16 = 0x020F;
    pub const SC_INTERFACE_VERSION: u16 = 0x0210;
    pub const CALLBACK_NUM_PRES_IND: u16 = 0x0302;
    pub const CALLBACK_NUM_ATAG: u16 = 0x0303;
    pub const NUMBER_OF_MESSAGES: u16 = 0x0304;
    pub const CALLBACK_NUM: u16 = 0x0381;
    pub const DPF_RESULT: u16 = 0x0420;
    pub const SET_DPF: u16 = 0x0421;
    pub const MS_AVAILABILITY_STATUS: u16 = 0x0422;
    pub const NETWORK_ERROR_CODE: u16 = 0x0423;
    pub const MESSAGE_PAYLOAD: u16 = 0x0424;
    pub const DELIVERY_FAILURE_REASON: u16 = 0x0425;
    pub const MORE_MESSAGES_TO_SEND: u16 = 0x0426;
    pub const MESSAGE_STATE: u16 = 0x0427;
    pub const USSD_SERVICE_OP: u16 = 0x0501;
    pub const DISPLAY_TIME: u16 = 0x1201;
    pub const SMS_SIGNAL: u16 = 0x1203;
    pub const MS_VALIDITY: u16 = 0x1204;
    pub const ALERT_ON_MESSAGE_DELIVERY: u16 = 0x130C;
    pub const ITS_REPLY_TYPE: u16 = 0x1380;
    pub const ITS_SESSION_INFO: u16 = 0x1383;
}

/// Name of a standard tag, for log messages about skipped TLVs.
pub(crate) fn tag_name(tag: u16) -> Option<&'static str> {
    use tags::*;
    Some(match tag {
        DEST_ADDR_SUBUNIT => "dest_addr_subunit",
        DEST_NETWORK_TYPE => "dest_network_type",
        DEST_BEARER_TYPE => "dest_bearer_type",
        DEST_TELEMATICS_ID => "dest_telematics_id",
        SOURCE_ADDR_SUBUNIT => "source_addr_subunit",
        SOURCE_NETWORK_TYPE => "source_network_type",
        SOURCE_BEARER_TYPE => "source_bearer_type",
        SOURCE_TELEMATICS_ID => "source_telematics_id",
        QOS_TIME_TO_LIVE => "qos_time_to_live",
        PAYLOAD_TYPE => "payload_type",
        ADDITIONAL_STATUS_INFO_TEXT => "additional_status_info_text",
        RECEIPTED_MESSAGE_ID => "receipted_message_id",
        MS_MSG_WAIT_FACILITIES => "ms_msg_wait_facilities",
        PRIVACY_INDICATOR => "privacy_indicator",
        SOURCE_SUBADDRESS => "source_subaddress",
        DEST_SUBADDRESS => "dest_subaddress",
        USER_MESSAGE_REFERENCE => "user_message_reference",
        USER_RESPONSE_CODE => "user_response_code",
        SOURCE_PORT => "source_port",
        DESTINATION_PORT => "destination_port",
        SAR_MSG_REF_NUM => "sar_msg_ref_num",
        LANGUAGE_INDICATOR => "language_indicator",
        SAR_TOTAL_SEGMENTS => "sar_total_segments",
        SAR_SEGMENT_SEQNUM => "sar_segment_seqnum",
        SC_INTERFACE_VERSION => "sc_interface_version",
        CALLBACK_NUM_PRES_IND => "callback_num_pres_ind",
        CALLBACK_NUM_ATAG => "callback_num_atag",
        NUMBER_OF_MESSAGES => "number_of_messages",
        CALLBACK_NUM => "callback_num",
        DPF_RESULT => "dpf_result",
        SET_DPF => "set_dpf",
        MS_AVAILABILITY_STATUS => "ms_availability_status",
        NETWORK_ERROR_CODE => "network_error_code",
        MESSAGE_PAYLOAD => "message_payload",
        DELIVERY_FAILURE_REASON => "delivery_failure_reason",
        MORE_MESSAGES_TO_SEND => "more_messages_to_send",
        MESSAGE_STATE => "message_state",
        USSD_SERVICE_OP => "ussd_service_op",
        DISPLAY_TIME => "display_time",
        SMS_SIGNAL => "sms_signal",
        MS_VALIDITY => "ms_validity",
        ALERT_ON_MESSAGE_DELIVERY => "alert_on_message_delivery",
        ITS_REPLY_TYPE => "its_reply_type",
        ITS_SESSION_INFO => "its_session_info",
        _ => return None,
    })
}

/// Schema of one command: ordered mandatory parameters plus permitted TLVs.
#[derive(Debug)]
pub(crate) struct CommandTable {
    pub mandatory: &'static [ParamSpec],
    pub optional: &'static [TlvDef],
}

static EMPTY: CommandTable = CommandTable {
    mandatory: &[],
    optional: &[],
};

// All three bind variants use the same body.
static BIND: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("system_id", 16),
        ParamSpec::cstring("password", 9),
        ParamSpec::cstring("system_type", 13),
        ParamSpec::int_default("interface_version", 1, 0x34),
        ParamSpec::int("addr_ton", 1),
        ParamSpec::int("addr_npi", 1),
        ParamSpec::cstring("address_range", 41),
    ],
    optional: &[],
};

static BIND_RESP: CommandTable = CommandTable {
    mandatory: &[ParamSpec::cstring("system_id", 16)],
    optional: &[TlvDef::int(
        tags::SC_INTERFACE_VERSION,
        "sc_interface_version",
        1,
    )],
};

static OUTBIND: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("system_id", 16),
        ParamSpec::cstring("password", 9),
    ],
    optional: &[],
};

const SM_BODY: &[ParamSpec] = &[
    ParamSpec::cstring("service_type", 6),
    ParamSpec::int("source_addr_ton", 1),
    ParamSpec::int("source_addr_npi", 1),
    ParamSpec::cstring("source_addr", 21),
    ParamSpec::int("dest_addr_ton", 1),
    ParamSpec::int("dest_addr_npi", 1),
    ParamSpec::cstring("destination_addr", 21),
    ParamSpec::int("esm_class", 1),
    ParamSpec::int("protocol_id", 1),
    ParamSpec::int("priority_flag", 1),
    ParamSpec::cstring("schedule_delivery_time", 17),
    ParamSpec::cstring("validity_period", 17),
    ParamSpec::int("registered_delivery", 1),
    ParamSpec::int("replace_if_present_flag", 1),
    ParamSpec::int("data_coding", 1),
    ParamSpec::int("sm_default_msg_id", 1),
    ParamSpec::int("sm_length", 1),
    ParamSpec::octets("short_message", 254, "sm_length"),
];

static SUBMIT_SM: CommandTable = CommandTable {
    mandatory: SM_BODY,
    optional: &[
        TlvDef::int(tags::USER_MESSAGE_REFERENCE, "user_message_reference", 1),
        TlvDef::int(tags::SOURCE_PORT, "source_port", 2),
        TlvDef::int(tags::SOURCE_ADDR_SUBUNIT, "source_addr_subunit", 1),
        TlvDef::int(tags::DESTINATION_PORT, "destination_port", 2),
        TlvDef::int(tags::DEST_ADDR_SUBUNIT, "dest_addr_subunit", 1),
        TlvDef::int(tags::SAR_MSG_REF_NUM, "sar_msg_ref_num", 2),
        TlvDef::int(tags::SAR_TOTAL_SEGMENTS, "sar_total_segments", 1),
        TlvDef::int(tags::SAR_SEGMENT_SEQNUM, "sar_segment_seqnum", 1),
        TlvDef::int(tags::MORE_MESSAGES_TO_SEND, "more_messages_to_send", 1),
        TlvDef::int(tags::PAYLOAD_TYPE, "payload_type", 1),
        TlvDef::octets(tags::MESSAGE_PAYLOAD, "message_payload", 260),
        TlvDef::int(tags::PRIVACY_INDICATOR, "privacy_indicator", 1),
        TlvDef::octets(tags::CALLBACK_NUM, "callback_num", 19),
        TlvDef::int(tags::CALLBACK_NUM_PRES_IND, "callback_num_pres_ind", 1),
        TlvDef::cstring(tags::SOURCE_SUBADDRESS, "source_subaddress", 23),
        TlvDef::cstring(tags::DEST_SUBADDRESS, "dest_subaddress", 23),
        TlvDef::int(tags::USER_RESPONSE_CODE, "user_response_code", 1),
        TlvDef::int(tags::DISPLAY_TIME, "display_time", 1),
        TlvDef::int(tags::SMS_SIGNAL, "sms_signal", 2),
        TlvDef::int(tags::MS_VALIDITY, "ms_validity", 1),
        TlvDef::int(tags::MS_MSG_WAIT_FACILITIES, "ms_msg_wait_facilities", 1),
        TlvDef::int(tags::NUMBER_OF_MESSAGES, "number_of_messages", 1),
        TlvDef::int(
            tags::ALERT_ON_MESSAGE_DELIVERY,
            "alert_on_message_delivery",
            1,
        ),
        TlvDef::int(tags::LANGUAGE_INDICATOR, "language_indicator", 1),
        TlvDef::int(tags::ITS_REPLY_TYPE, "its_reply_type", 1),
        TlvDef::int(tags::ITS_SESSION_INFO, "its_session_info", 2),
        TlvDef::int(tags::USSD_SERVICE_OP, "ussd_service_op", 1),
    ],
};

static MESSAGE_ID_ONLY: CommandTable = CommandTable {
    mandatory: &[ParamSpec::cstring("message_id", 65)],
    optional: &[],
};

static DELIVER_SM: CommandTable = CommandTable {
    mandatory: SM_BODY,
    optional: &[
        TlvDef::int(tags::USER_MESSAGE_REFERENCE, "user_message_reference", 1),
        TlvDef::int(tags::SOURCE_PORT, "source_port", 2),
        TlvDef::int(tags::DESTINATION_PORT, "destination_port", 2),
        TlvDef::int(tags::SAR_MSG_REF_NUM, "sar_msg_ref_num", 2),
        TlvDef::int(tags::SAR_TOTAL_SEGMENTS, "sar_total_segments", 1),
        TlvDef::int(tags::SAR_SEGMENT_SEQNUM, "sar_segment_seqnum", 1),
        TlvDef::int(tags::USER_RESPONSE_CODE, "user_response_code", 1),
        TlvDef::int(tags::PRIVACY_INDICATOR, "privacy_indicator", 1),
        TlvDef::int(tags::PAYLOAD_TYPE, "payload_type", 1),
        TlvDef::octets(tags::MESSAGE_PAYLOAD, "message_payload", 260),
        TlvDef::octets(tags::CALLBACK_NUM, "callback_num", 19),
        TlvDef::cstring(tags::SOURCE_SUBADDRESS, "source_subaddress", 23),
        TlvDef::cstring(tags::DEST_SUBADDRESS, "dest_subaddress", 23),
        TlvDef::int(tags::LANGUAGE_INDICATOR, "language_indicator", 1),
        TlvDef::int(tags::ITS_SESSION_INFO, "its_session_info", 2),
        TlvDef::octets_fixed(tags::NETWORK_ERROR_CODE, "network_error_code", 3),
        TlvDef::int(tags::MESSAGE_STATE, "message_state", 1),
        TlvDef::cstring(tags::RECEIPTED_MESSAGE_ID, "receipted_message_id", 65),
        TlvDef::int(tags::SOURCE_NETWORK_TYPE, "source_network_type", 1),
        TlvDef::int(tags::DEST_NETWORK_TYPE, "dest_network_type", 1),
        TlvDef::int(tags::MORE_MESSAGES_TO_SEND, "more_messages_to_send", 1),
    ],
};

static DATA_SM: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("service_type", 6),
        ParamSpec::int("source_addr_ton", 1),
        ParamSpec::int("source_addr_npi", 1),
        ParamSpec::cstring("source_addr", 21),
        ParamSpec::int("dest_addr_ton", 1),
        ParamSpec::int("dest_addr_npi", 1),
        ParamSpec::cstring("destination_addr", 21),
        ParamSpec::int("esm_class", 1),
        ParamSpec::int("registered_delivery", 1),
        ParamSpec::int("data_coding", 1),
    ],
    optional: &[
        TlvDef::int(tags::SOURCE_PORT, "source_port", 2),
        TlvDef::int(tags::SOURCE_ADDR_SUBUNIT, "source_addr_subunit", 1),
        TlvDef::int(tags::SOURCE_NETWORK_TYPE, "source_network_type", 1),
        TlvDef::int(tags::SOURCE_BEARER_TYPE, "source_bearer_type", 1),
        TlvDef::int(tags::SOURCE_TELEMATICS_ID, "source_telematics_id", 2),
        TlvDef::int(tags::DESTINATION_PORT, "destination_port", 2),
        TlvDef::int(tags::DEST_ADDR_SUBUNIT, "dest_addr_subunit", 1),
        TlvDef::int(tags::DEST_NETWORK_TYPE, "dest_network_type", 1),
        TlvDef::int(tags::DEST_BEARER_TYPE, "dest_bearer_type", 1),
        TlvDef::int(tags::DEST_TELEMATICS_ID, "dest_telematics_id", 2),
        TlvDef::int(tags::SAR_MSG_REF_NUM, "sar_msg_ref_num", 2),
        TlvDef::int(tags::SAR_TOTAL_SEGMENTS, "sar_total_segments", 1),
        TlvDef::int(tags::SAR_SEGMENT_SEQNUM, "sar_segment_seqnum", 1),
        TlvDef::int(tags::MORE_MESSAGES_TO_SEND, "more_messages_to_send", 1),
        TlvDef::int(tags::QOS_TIME_TO_LIVE, "qos_time_to_live", 4),
        TlvDef::int(tags::PAYLOAD_TYPE, "payload_type", 1),
        TlvDef::octets(tags::MESSAGE_PAYLOAD, "message_payload", 260),
        TlvDef::cstring(tags::RECEIPTED_MESSAGE_ID, "receipted_message_id", 65),
        TlvDef::int(tags::MESSAGE_STATE, "message_state", 1),
        TlvDef::octets_fixed(tags::NETWORK_ERROR_CODE, "network_error_code", 3),
        TlvDef::int(tags::USER_MESSAGE_REFERENCE, "user_message_reference", 2),
        TlvDef::int(tags::PRIVACY_INDICATOR, "privacy_indicator", 1),
        TlvDef::octets(tags::CALLBACK_NUM, "callback_num", 19),
        TlvDef::int(tags::CALLBACK_NUM_PRES_IND, "callback_num_pres_ind", 1),
        TlvDef::cstring(tags::CALLBACK_NUM_ATAG, "callback_num_atag", 65),
        TlvDef::cstring(tags::SOURCE_SUBADDRESS, "source_subaddress", 23),
        TlvDef::cstring(tags::DEST_SUBADDRESS, "dest_subaddress", 23),
        TlvDef::int(tags::USER_RESPONSE_CODE, "user_response_code", 1),
        TlvDef::int(tags::DISPLAY_TIME, "display_time", 1),
        TlvDef::int(tags::SMS_SIGNAL, "sms_signal", 2),
        TlvDef::int(tags::MS_VALIDITY, "ms_validity", 1),
        TlvDef::int(tags::MS_MSG_WAIT_FACILITIES, "ms_msg_wait_facilities", 1),
        TlvDef::int(tags::NUMBER_OF_MESSAGES, "number_of_messages", 1),
        TlvDef::int(
            tags::ALERT_ON_MESSAGE_DELIVERY,
            "alert_on_message_delivery",
            1,
        ),
        TlvDef::int(tags::LANGUAGE_INDICATOR, "language_indicator", 1),
        TlvDef::int(tags::ITS_REPLY_TYPE, "its_reply_type", 1),
        TlvDef::int(tags::ITS_SESSION_INFO, "its_session_info", 2),
    ],
};

static DATA_SM_RESP: CommandTable = CommandTable {
    mandatory: &[ParamSpec::cstring("message_id", 65)],
    optional: &[
        TlvDef::int(tags::DELIVERY_FAILURE_REASON, "delivery_failure_reason", 1),
        TlvDef::octets_fixed(tags::NETWORK_ERROR_CODE, "network_error_code", 3),
        TlvDef::cstring(
            tags::ADDITIONAL_STATUS_INFO_TEXT,
            "additional_status_info_text",
            256,
        ),
        TlvDef::int(tags::DPF_RESULT, "dpf_result", 1),
    ],
};

static QUERY_SM: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("message_id", 65),
        ParamSpec::int("source_addr_ton", 1),
        ParamSpec::int("source_addr_npi", 1),
        ParamSpec::cstring("source_addr", 21),
    ],
    optional: &[],
};

// message_state is a mandatory field here even though 0x0427 is a registered
// optional tag on deliver_sm and data_sm.
static QUERY_SM_RESP: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("message_id", 65),
        ParamSpec::cstring("final_date", 17),
        ParamSpec::int("message_state", 1),
        ParamSpec::int("error_code", 1),
    ],
    optional: &[],
};

static CANCEL_SM: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("service_type", 6),
        ParamSpec::cstring("message_id", 65),
        ParamSpec::int("source_addr_ton", 1),
        ParamSpec::int("source_addr_npi", 1),
        ParamSpec::cstring("source_addr", 21),
        ParamSpec::int("dest_addr_ton", 1),
        ParamSpec::int("dest_addr_npi", 1),
        ParamSpec::cstring("destination_addr", 21),
    ],
    optional: &[],
};

static REPLACE_SM: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("message_id", 65),
        ParamSpec::int("source_addr_ton", 1),
        ParamSpec::int("source_addr_npi", 1),
        ParamSpec::cstring("source_addr", 21),
        ParamSpec::cstring("schedule_delivery_time", 17),
        ParamSpec::cstring("validity_period", 17),
        ParamSpec::int("registered_delivery", 1),
        ParamSpec::int("sm_default_msg_id", 1),
        ParamSpec::int("sm_length", 1),
        ParamSpec::octets("short_message", 254, "sm_length"),
    ],
    optional: &[],
};

static SUBMIT_MULTI: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("service_type", 6),
        ParamSpec::int("source_addr_ton", 1),
        ParamSpec::int("source_addr_npi", 1),
        ParamSpec::cstring("source_addr", 21),
        ParamSpec::int("number_of_dests", 1),
        ParamSpec::dest_address_list("dest_address", "number_of_dests"),
        ParamSpec::int("esm_class", 1),
        ParamSpec::int("protocol_id", 1),
        ParamSpec::int("priority_flag", 1),
        ParamSpec::cstring("schedule_delivery_time", 17),
        ParamSpec::cstring("validity_period", 17),
        ParamSpec::int("registered_delivery", 1),
        ParamSpec::int("replace_if_present_flag", 1),
        ParamSpec::int("data_coding", 1),
        ParamSpec::int("sm_default_msg_id", 1),
        ParamSpec::int("sm_length", 1),
        ParamSpec::octets("short_message", 254, "sm_length"),
    ],
    optional: &[
        TlvDef::int(tags::USER_MESSAGE_REFERENCE, "user_message_reference", 1),
        TlvDef::int(tags::SOURCE_PORT, "source_port", 2),
        TlvDef::int(tags::SOURCE_ADDR_SUBUNIT, "source_addr_subunit", 1),
        TlvDef::int(tags::DESTINATION_PORT, "destination_port", 2),
        TlvDef::int(tags::DEST_ADDR_SUBUNIT, "dest_addr_subunit", 1),
        TlvDef::int(tags::SAR_MSG_REF_NUM, "sar_msg_ref_num", 2),
        TlvDef::int(tags::SAR_TOTAL_SEGMENTS, "sar_total_segments", 1),
        TlvDef::int(tags::SAR_SEGMENT_SEQNUM, "sar_segment_seqnum", 1),
        TlvDef::int(tags::MORE_MESSAGES_TO_SEND, "more_messages_to_send", 1),
        TlvDef::int(tags::PAYLOAD_TYPE, "payload_type", 1),
        TlvDef::octets(tags::MESSAGE_PAYLOAD, "message_payload", 260),
        TlvDef::int(tags::PRIVACY_INDICATOR, "privacy_indicator", 1),
        TlvDef::octets(tags::CALLBACK_NUM, "callback_num", 19),
        TlvDef::int(tags::CALLBACK_NUM_PRES_IND, "callback_num_pres_ind", 1),
        TlvDef::cstring(tags::CALLBACK_NUM_ATAG, "callback_num_atag", 65),
        TlvDef::cstring(tags::SOURCE_SUBADDRESS, "source_subaddress", 23),
        TlvDef::cstring(tags::DEST_SUBADDRESS, "dest_subaddress", 23),
        TlvDef::int(tags::USER_RESPONSE_CODE, "user_response_code", 1),
        TlvDef::int(tags::DISPLAY_TIME, "display_time", 1),
        TlvDef::int(tags::SMS_SIGNAL, "sms_signal", 2),
        TlvDef::int(tags::MS_VALIDITY, "ms_validity", 1),
        TlvDef::int(tags::MS_MSG_WAIT_FACILITIES, "ms_msg_wait_facilities", 1),
        TlvDef::int(
            tags::ALERT_ON_MESSAGE_DELIVERY,
            "alert_on_message_delivery",
            1,
        ),
        TlvDef::int(tags::LANGUAGE_INDICATOR, "language_indicator", 1),
    ],
};

static SUBMIT_MULTI_RESP: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::cstring("message_id", 65),
        ParamSpec::int("no_unsuccess", 1),
        ParamSpec::unsuccess_sme_list("unsuccess_sme", "no_unsuccess"),
    ],
    optional: &[],
};

static ALERT_NOTIFICATION: CommandTable = CommandTable {
    mandatory: &[
        ParamSpec::int("source_addr_ton", 1),
        ParamSpec::int("source_addr_npi", 1),
        ParamSpec::cstring("source_addr", 21),
        ParamSpec::int("esme_addr_ton", 1),
        ParamSpec::int("esme_addr_npi", 1),
        ParamSpec::cstring("esme_addr", 21),
    ],
    optional: &[TlvDef::int(
        tags::MS_AVAILABILITY_STATUS,
        "ms_availability_status",
        1,
    )],
};

pub(crate) fn table(id: CommandId) -> &'static CommandTable {
    match id {
        CommandId::BindTransmitter | CommandId::BindReceiver | CommandId::BindTransceiver => &BIND,
        CommandId::BindTransmitterResp
        | CommandId::BindReceiverResp
        | CommandId::BindTransceiverResp => &BIND_RESP,
        CommandId::Outbind => &OUTBIND,
        CommandId::SubmitSm => &SUBMIT_SM,
        CommandId::SubmitSmResp | CommandId::DeliverSmResp => &MESSAGE_ID_ONLY,
        CommandId::DeliverSm => &DELIVER_SM,
        CommandId::DataSm => &DATA_SM,
        CommandId::DataSmResp => &DATA_SM_RESP,
        CommandId::QuerySm => &QUERY_SM,
        CommandId::QuerySmResp => &QUERY_SM_RESP,
        CommandId::CancelSm => &CANCEL_SM,
        CommandId::ReplaceSm => &REPLACE_SM,
        CommandId::SubmitMulti => &SUBMIT_MULTI,
        CommandId::SubmitMultiResp => &SUBMIT_MULTI_RESP,
        CommandId::AlertNotification => &ALERT_NOTIFICATION,
        CommandId::EnquireLink
        | CommandId::EnquireLinkResp
        | CommandId::Unbind
        | CommandId::UnbindResp
        | CommandId::CancelSmResp
        | CommandId::ReplaceSmResp
        | CommandId::GenericNack => &EMPTY,
    }
}
