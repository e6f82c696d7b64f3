use std::io::{self, Write};

use crate::config::ConnectionConfig;
use crate::highlight::Theme;

const BANNER: &str = "\n\n\
\t███    ██  ██████  ██████  ███████ ███    ██  █████  ███    ███  ██████  \n\
\t████   ██ ██    ██ ██   ██ ██      ████   ██ ██   ██ ████  ████ ██    ██ \n\
\t██ ██  ██ ██    ██ ██   ██ █████   ██ ██  ██ ███████ ██ ████ ██ ██    ██ \n\
\t██  ██ ██ ██    ██ ██   ██ ██      ██  ██ ██ ██   ██ ██  ██  ██ ██    ██ \n\
\t██   ████  ██████  ██████  ███████ ██   ████ ██   ██ ██      ██  ██████  \n\n";

pub fn print_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", BANNER)
}

/// Shows which profile or endpoint the session talks to.
pub fn print_configuration(
    out: &mut dyn Write,
    connection: &ConnectionConfig,
    theme: &Theme,
) -> io::Result<()> {
    writeln!(out, "{}", theme.heading("Using:"))?;

    match connection {
        ConnectionConfig::Credentials(credentials) => {
            writeln!(
                out,
                "{}{}",
                theme.label("    profile: "),
                theme.attention(&credentials.profile)
            )?;
            if let Some(role) = &credentials.role_arn {
                writeln!(out, "{}{}", theme.label("    Role: "), theme.attention(role))?;
            }
        }
        ConnectionConfig::Endpoint(endpoint) => {
            writeln!(out, "{}{}\n", theme.label("    Endpoint: "), theme.attention(endpoint))?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn summary(connection: &ConnectionConfig) -> String {
        let mut out = Vec::new();
        print_configuration(&mut out, connection, &Theme::plain()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_profile_with_role() {
        let connection = ConnectionConfig::Credentials(Credentials {
            profile: "prod".to_string(),
            role_arn: Some("arn:aws:iam::123:role/admin".to_string()),
            ..Credentials::default()
        });

        assert_eq!(
            summary(&connection),
            "Using:\n    profile: prod\n    Role: arn:aws:iam::123:role/admin\n\n"
        );
    }

    #[test]
    fn test_endpoint() {
        let connection = ConnectionConfig::Endpoint("http://localhost:8000".to_string());
        assert_eq!(
            summary(&connection),
            "Using:\n    Endpoint: http://localhost:8000\n\n\n"
        );
    }
}
