use serde::Serialize;

use crate::core::models::service_settings::ServiceSettings;

/// Whether a path setting points at a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    File,
    Directory,
}

/// How a display layer should let the user enter a setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputKind {
    /// Free text.
    Plain,
    /// One of a fixed set of values.
    Choice { values: &'static [&'static str] },
    /// A file or directory picker.
    Path {
        mode: PathMode,
        filter: &'static str,
        title: &'static str,
    },
}

/// Reference data for a well-known libpq connection parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
    pub input: InputKind,
}

pub const SSL_MODES: &[&str] = &[
    "disable",
    "allow",
    "prefer",
    "require",
    "verify-ca",
    "verify-full",
];

pub const TARGET_SESSION_ATTRS: &[&str] = &[
    "any",
    "read-write",
    "read-only",
    "primary",
    "standby",
    "prefer-standby",
];

pub const GSSENC_MODES: &[&str] = &["disable", "prefer", "require"];

const fn plain(
    key: &'static str,
    default: &'static str,
    description: &'static str,
) -> SettingDescriptor {
    SettingDescriptor {
        key,
        default,
        description,
        input: InputKind::Plain,
    }
}

const fn file(
    key: &'static str,
    description: &'static str,
    filter: &'static str,
    title: &'static str,
) -> SettingDescriptor {
    SettingDescriptor {
        key,
        default: "",
        description,
        input: InputKind::Path {
            mode: PathMode::File,
            filter,
            title,
        },
    }
}

// See https://www.postgresql.org/docs/current/libpq-connect.html#LIBPQ-PARAMKEYWORDS
static DESCRIPTORS: &[SettingDescriptor] = &[
    plain("host", "localhost", "Name of host to connect to."),
    plain(
        "hostaddr",
        "",
        "Numeric IP address of host to connect to. Skips host name lookup.",
    ),
    plain("port", "5432", "Port number to connect to at the server host."),
    plain("dbname", "test", "The database name."),
    plain("user", "", "PostgreSQL user name to connect as."),
    plain(
        "password",
        "",
        "Password to be used if the server demands password authentication.",
    ),
    file(
        "passfile",
        "File used to store passwords.",
        "Password files (*.pgpass *.conf);;All files (*)",
        "Select password file",
    ),
    plain(
        "connect_timeout",
        "10",
        "Maximum time to wait while connecting, in seconds.",
    ),
    plain(
        "application_name",
        "",
        "Value for the application_name configuration parameter.",
    ),
    plain(
        "options",
        "",
        "Command-line options to send to the server at connection start.",
    ),
    SettingDescriptor {
        key: "sslmode",
        default: "prefer",
        description: "Whether or with what priority a secure SSL TCP/IP connection will be negotiated.",
        input: InputKind::Choice { values: SSL_MODES },
    },
    file(
        "sslcert",
        "File name of the client SSL certificate.",
        "Certificates (*.crt *.pem);;All files (*)",
        "Select client certificate",
    ),
    file(
        "sslkey",
        "Location of the secret key used for the client certificate.",
        "Keys (*.key *.pem);;All files (*)",
        "Select client key",
    ),
    file(
        "sslrootcert",
        "File containing SSL certificate authority (CA) certificate(s).",
        "Certificates (*.crt *.pem);;All files (*)",
        "Select root certificate",
    ),
    file(
        "sslcrl",
        "File containing the SSL server certificate revocation list.",
        "Revocation lists (*.crl *.pem);;All files (*)",
        "Select certificate revocation list",
    ),
    SettingDescriptor {
        key: "sslcrldir",
        default: "",
        description: "Directory containing the SSL server certificate revocation list.",
        input: InputKind::Path {
            mode: PathMode::Directory,
            filter: "",
            title: "Select revocation list directory",
        },
    },
    SettingDescriptor {
        key: "gssencmode",
        default: "prefer",
        description: "Whether or with what priority a secure GSS TCP/IP connection will be negotiated.",
        input: InputKind::Choice {
            values: GSSENC_MODES,
        },
    },
    SettingDescriptor {
        key: "target_session_attrs",
        default: "any",
        description: "Which kind of server a connection is acceptable for.",
        input: InputKind::Choice {
            values: TARGET_SESSION_ATTRS,
        },
    },
];

/// Returns the static descriptor table, in libpq documentation order.
pub fn setting_descriptors() -> &'static [SettingDescriptor] {
    DESCRIPTORS
}

/// Look up the descriptor for `key`.
pub fn setting_descriptor(key: &str) -> Option<&'static SettingDescriptor> {
    DESCRIPTORS.iter().find(|d| d.key == key)
}

/// Settings proposed for the first service of a freshly created file.
pub fn settings_template() -> ServiceSettings {
    ServiceSettings::from([("host", "localhost"), ("port", "5432"), ("dbname", "test")])
}
