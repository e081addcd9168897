use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A backend-reported unit of provisioned infrastructure.
///
/// `session_id` is the unique key used for acknowledgment tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub session_id: String,
    pub timestamp: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Deployment {
    /// Timestamp in local time, or the raw string if it cannot be parsed.
    ///
    /// Timestamps without an offset are taken as local wall-clock time.
    pub fn display_timestamp(&self) -> String {
        const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";
        let raw = self.timestamp.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.with_timezone(&Local).format(DISPLAY).to_string();
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return local.format(DISPLAY).to_string();
            }
        }
        self.timestamp.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Rds,
    Ec2,
    Ecs,
    LoadBalancer,
    SshKey,
    Other,
}

impl ResourceKind {
    /// Case-insensitive match on the wire `type` string
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rds" => ResourceKind::Rds,
            "ec2" => ResourceKind::Ec2,
            "ecs" => ResourceKind::Ecs,
            "loadbalancer" => ResourceKind::LoadBalancer,
            "ssh_key" => ResourceKind::SshKey,
            _ => ResourceKind::Other,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ResourceKind::Rds => "🗄",
            ResourceKind::Ec2 => "🖥",
            ResourceKind::Ecs | ResourceKind::LoadBalancer => "🌐",
            ResourceKind::SshKey => "🔑",
            ResourceKind::Other => "🔧",
        }
    }
}

/// A single provisioned item within a deployment.
///
/// Type-specific fields are only present for the kinds that use them:
/// `endpoint`/`username`/`password` for RDS, `ip_address` for EC2 and
/// `dns_name` for ECS and load balancers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub deployment_id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub resource_name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub dns_name: Option<String>,
}

/// One row of a resource's detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLine {
    Field { label: &'static str, value: String },
    /// Addressable location (endpoint, IP, DNS name), rendered highlighted
    Link { label: &'static str, value: String },
    Credentials(CredentialView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialView {
    Hidden,
    Revealed {
        username: Option<String>,
        password: Option<String>,
    },
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::classify(&self.resource_type)
    }

    pub fn type_label(&self) -> String {
        self.resource_type.to_uppercase()
    }

    pub fn has_credentials(&self) -> bool {
        present(&self.username).is_some() || present(&self.password).is_some()
    }

    /// Whether the detail view has a credentials row that can be revealed
    pub fn shows_credentials(&self) -> bool {
        self.kind() == ResourceKind::Rds && self.has_credentials()
    }

    /// Rows to display for this resource.
    ///
    /// `value` only appears for non-sensitive resources. Credentials are
    /// only listed for RDS, and only as values once `revealed` is set.
    pub fn detail_lines(&self, revealed: bool) -> Vec<DetailLine> {
        let mut lines = vec![DetailLine::Field {
            label: "Name",
            value: self.resource_name.clone(),
        }];
        if !self.is_sensitive {
            if let Some(value) = present(&self.value) {
                lines.push(DetailLine::Field {
                    label: "Value",
                    value: value.to_string(),
                });
            }
        }

        match self.kind() {
            ResourceKind::Rds => {
                if let Some(endpoint) = present(&self.endpoint) {
                    lines.push(DetailLine::Link {
                        label: "Endpoint",
                        value: endpoint.to_string(),
                    });
                }
                if self.shows_credentials() {
                    let view = if revealed {
                        CredentialView::Revealed {
                            username: present(&self.username).map(str::to_string),
                            password: present(&self.password).map(str::to_string),
                        }
                    } else {
                        CredentialView::Hidden
                    };
                    lines.push(DetailLine::Credentials(view));
                }
            }
            ResourceKind::Ec2 => {
                if let Some(ip) = present(&self.ip_address) {
                    lines.push(DetailLine::Link {
                        label: "IP Address",
                        value: ip.to_string(),
                    });
                }
            }
            ResourceKind::Ecs | ResourceKind::LoadBalancer => {
                if let Some(dns) = present(&self.dns_name) {
                    lines.push(DetailLine::Link {
                        label: "DNS",
                        value: dns.to_string(),
                    });
                }
            }
            ResourceKind::SshKey | ResourceKind::Other => {}
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(kind: &str) -> Resource {
        Resource {
            deployment_id: "dep-1".to_string(),
            resource_type: kind.to_string(),
            resource_name: "main-db".to_string(),
            value: Some("arn:aws:rds:db".to_string()),
            is_sensitive: false,
            endpoint: None,
            username: None,
            password: None,
            ip_address: None,
            dns_name: None,
        }
    }

    fn labels(lines: &[DetailLine]) -> Vec<&'static str> {
        lines
            .iter()
            .map(|l| match l {
                DetailLine::Field { label, .. } | DetailLine::Link { label, .. } => *label,
                DetailLine::Credentials(_) => "Credentials",
            })
            .collect()
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(ResourceKind::classify("RDS"), ResourceKind::Rds);
        assert_eq!(ResourceKind::classify("Ec2"), ResourceKind::Ec2);
        assert_eq!(ResourceKind::classify("LoadBalancer"), ResourceKind::LoadBalancer);
        assert_eq!(ResourceKind::classify("SSH_KEY"), ResourceKind::SshKey);
        assert_eq!(ResourceKind::classify("lambda"), ResourceKind::Other);
    }

    #[test]
    fn test_sensitive_value_is_hidden() {
        let mut r = resource("s3");
        r.is_sensitive = true;
        assert_eq!(labels(&r.detail_lines(true)), vec!["Name"]);

        r.is_sensitive = false;
        assert_eq!(labels(&r.detail_lines(false)), vec!["Name", "Value"]);
    }

    #[test]
    fn test_empty_value_is_omitted() {
        let mut r = resource("s3");
        r.value = Some(String::new());
        assert_eq!(labels(&r.detail_lines(false)), vec!["Name"]);
    }

    #[test]
    fn test_rds_credentials_hidden_until_revealed() {
        let mut r = resource("rds");
        r.endpoint = Some("db.example.com:5432".to_string());
        r.username = Some("admin".to_string());
        r.password = Some("hunter2".to_string());

        let hidden = r.detail_lines(false);
        assert_eq!(labels(&hidden), vec!["Name", "Value", "Endpoint", "Credentials"]);
        assert_eq!(hidden[3], DetailLine::Credentials(CredentialView::Hidden));

        let shown = r.detail_lines(true);
        assert_eq!(
            shown[3],
            DetailLine::Credentials(CredentialView::Revealed {
                username: Some("admin".to_string()),
                password: Some("hunter2".to_string()),
            })
        );
    }

    #[test]
    fn test_rds_without_credentials_has_no_block() {
        let r = resource("rds");
        assert!(!r.has_credentials());
        assert_eq!(labels(&r.detail_lines(true)), vec!["Name", "Value"]);
    }

    #[test]
    fn test_type_specific_links() {
        let mut ec2 = resource("EC2");
        ec2.ip_address = Some("10.0.0.4".to_string());
        ec2.dns_name = Some("ignored.example.com".to_string());
        assert_eq!(labels(&ec2.detail_lines(false)), vec!["Name", "Value", "IP Address"]);

        let mut lb = resource("loadbalancer");
        lb.dns_name = Some("lb.example.com".to_string());
        assert_eq!(labels(&lb.detail_lines(false)), vec!["Name", "Value", "DNS"]);

        let mut ecs = resource("ecs");
        ecs.dns_name = Some("svc.example.com".to_string());
        assert_eq!(labels(&ecs.detail_lines(false)), vec!["Name", "Value", "DNS"]);
    }

    #[test]
    fn test_unknown_type_uses_generic_view() {
        let mut r = resource("mystery");
        r.endpoint = Some("x".to_string());
        r.username = Some("u".to_string());
        assert_eq!(labels(&r.detail_lines(true)), vec!["Name", "Value"]);
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let json = r#"{
            "session_id": "abc",
            "timestamp": "2024-05-01T10:30:00",
            "resources": [{"deployment_id": "d1", "type": "ec2", "resource_name": "web"}]
        }"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        assert_eq!(deployment.resources.len(), 1);
        let r = &deployment.resources[0];
        assert_eq!(r.kind(), ResourceKind::Ec2);
        assert!(!r.is_sensitive);
        assert!(r.value.is_none());
    }

    #[test]
    fn test_naive_timestamp_keeps_wall_clock() {
        let deployment = Deployment {
            session_id: "a".to_string(),
            timestamp: "2024-05-01T10:30:00.123456".to_string(),
            resources: vec![],
        };
        assert_eq!(deployment.display_timestamp(), "2024-05-01 10:30:00");
    }

    #[test]
    fn test_unparseable_timestamp_is_raw() {
        let deployment = Deployment {
            session_id: "a".to_string(),
            timestamp: "yesterday".to_string(),
            resources: vec![],
        };
        assert_eq!(deployment.display_timestamp(), "yesterday");
    }
}
