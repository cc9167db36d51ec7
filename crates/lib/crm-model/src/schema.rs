pub const PROP_COMPANY: &str = "company";
pub const PROP_JOBTITLE: &str = "jobtitle";
pub const PROP_OWNER_ID: &str = "hubspot_owner_id";

pub const PROP_DEAL_NAME: &str = "dealname";
pub const PROP_DEAL_AMOUNT: &str = "amount";
pub const PROP_DEAL_STAGE: &str = "dealstage";
pub const PROP_DEAL_PIPELINE: &str = "pipeline";
pub const PROP_DEAL_CLOSE_DATE: &str = "closedate";

pub const PROP_TIMESTAMP: &str = "hs_timestamp";
pub const PROP_NOTE_BODY: &str = "hs_note_body";
pub const PROP_EMAIL_SUBJECT: &str = "hs_email_subject";
pub const PROP_EMAIL_TEXT: &str = "hs_email_text";
pub const PROP_EMAIL_DIRECTION: &str = "hs_email_direction";
pub const PROP_EMAIL_STATUS: &str = "hs_email_status";
pub const PROP_TASK_SUBJECT: &str = "hs_task_subject";
pub const PROP_TASK_BODY: &str = "hs_task_body";
pub const PROP_TASK_STATUS: &str = "hs_task_status";
pub const PROP_TASK_PRIORITY: &str = "hs_task_priority";
pub const PROP_TASK_TYPE: &str = "hs_task_type";

pub const ASSOC_DEAL_TO_CONTACT: &str = "deal_to_contact";
pub const ASSOC_DEAL_TO_COMPANY: &str = "deal_to_company";
pub const ASSOC_NOTE_TO_CONTACT: &str = "note_to_contact";
pub const ASSOC_EMAIL_TO_CONTACT: &str = "email_to_contact";
pub const ASSOC_TASK_TO_CONTACT: &str = "task_to_contact";

pub const CONTACT_DEFAULT_PROPERTIES: &[&str] = &[
    "firstname",
    "lastname",
    "email",
    "phone",
    PROP_COMPANY,
    PROP_JOBTITLE,
    "lifecyclestage",
    PROP_OWNER_ID,
];

pub const COMPANY_DEFAULT_PROPERTIES: &[&str] = &[
    "name",
    "domain",
    "industry",
    "city",
    "country",
    "phone",
    PROP_OWNER_ID,
];

pub const DEAL_DEFAULT_PROPERTIES: &[&str] = &[
    PROP_DEAL_NAME,
    PROP_DEAL_AMOUNT,
    PROP_DEAL_STAGE,
    PROP_DEAL_PIPELINE,
    PROP_DEAL_CLOSE_DATE,
    PROP_OWNER_ID,
];

pub const TASK_DEFAULT_PROPERTIES: &[&str] = &[
    PROP_TASK_SUBJECT,
    PROP_TASK_BODY,
    PROP_TASK_STATUS,
    PROP_TASK_PRIORITY,
    PROP_TIMESTAMP,
    PROP_OWNER_ID,
];

pub const NOTE_PROPERTIES: &[&str] = &[
    PROP_NOTE_BODY,
    PROP_TIMESTAMP,
    "hs_createdate",
    "hs_lastmodifieddate",
];

pub const EMAIL_PROPERTIES: &[&str] = &[
    PROP_EMAIL_SUBJECT,
    PROP_EMAIL_TEXT,
    PROP_EMAIL_DIRECTION,
    PROP_EMAIL_STATUS,
    PROP_TIMESTAMP,
];

pub const CALL_PROPERTIES: &[&str] = &[
    "hs_call_title",
    "hs_call_body",
    "hs_call_duration",
    "hs_call_direction",
    PROP_TIMESTAMP,
];

pub const MEETING_PROPERTIES: &[&str] = &[
    "hs_meeting_title",
    "hs_meeting_body",
    "hs_meeting_start_time",
    "hs_meeting_end_time",
    PROP_TIMESTAMP,
];

pub const TASK_ENGAGEMENT_PROPERTIES: &[&str] = &[
    PROP_TASK_SUBJECT,
    PROP_TASK_BODY,
    PROP_TASK_STATUS,
    PROP_TASK_PRIORITY,
    PROP_TIMESTAMP,
];
