//! Plan documents, rule files and suites shared by the E2E tests

/// Plan for an SES module with a verified domain, DKIM and a DMARC record,
/// plus an email identity module
pub fn ses_plan() -> String {
    r#"{
  "format_version": "1.2",
  "planned_values": {
    "root_module": {
      "child_modules": [
        {
          "address": "module.ses_domain",
          "resources": [
            {
              "address": "module.ses_domain.aws_ses_domain_identity.this[0]",
              "type": "aws_ses_domain_identity",
              "name": "this",
              "values": { "domain": "example.com" }
            },
            {
              "type": "aws_ses_domain_dkim",
              "name": "this",
              "values": { "domain": "example.com" }
            },
            {
              "type": "aws_route53_record",
              "name": "amazonses_verification_record",
              "values": { "type": "TXT", "name": "_amazonses.example.com", "ttl": 600 }
            },
            {
              "type": "aws_route53_record",
              "name": "dmarc_record",
              "values": {
                "type": "TXT",
                "name": "_dmarc.example.com",
                "ttl": 600,
                "records": ["v=DMARC1; p=none; rua=mailto:dmarc@example.com"]
              }
            }
          ]
        },
        {
          "address": "module.ses_email",
          "resources": [
            {
              "type": "aws_ses_email_identity",
              "name": "this",
              "values": { "email": "ops@example.com" }
            }
          ]
        }
      ]
    }
  }
}"#
    .to_string()
}

/// Rules that all hold against [`ses_plan`]
pub fn passing_rules() -> String {
    r#"checks:
  - name: domain identity
    module: module.ses_domain
    resource_type: aws_ses_domain_identity
    attributes:
      - { key: domain, equals: example.com }
  - name: dkim
    module: module.ses_domain
    resource_type: aws_ses_domain_dkim
    attributes:
      - { key: domain, non_empty: true }
  - name: dmarc record
    module: module.ses_domain
    resource_type: aws_route53_record
    name_contains: dmarc
    attributes:
      - { key: type, equals: TXT }
      - { key: records, list_contains: "v=DMARC1" }
      - { key: records.0, matches: "p=(none|quarantine|reject)" }
  - name: email identity
    module: module.ses_email
    resource_type: aws_ses_email_identity
    attributes:
      - { key: email, contains: "@" }
"#
    .to_string()
}

/// One passing rule, one failing rule, one optional rule with nothing to match
pub fn mixed_rules() -> String {
    r#"checks:
  - name: domain identity
    module: module.ses_domain
    resource_type: aws_ses_domain_identity
  - name: verification ttl
    module: module.ses_domain
    resource_type: aws_route53_record
    name_contains: verification
    attributes:
      - { key: ttl, equals: "300" }
  - name: mail from
    module: module.ses_domain
    resource_type: aws_ses_domain_mail_from
    optional: true
"#
    .to_string()
}

/// Suite over `plan.json` with plan checks and shell commands
pub fn ses_suite() -> String {
    r#"name: Terraform AWS SES Tests
plan: plan.json
timeout_secs: 30
plan_checks:
  - name: domain identity
    module: module.ses_domain
    resource_type: aws_ses_domain_identity
  - name: missing module
    module: module.sns
    resource_type: aws_sns_topic
commands:
  - { name: format check, run: "true" }
  - { name: lint, run: "echo 'lint failed' >&2; exit 1" }
  - { name: live checks, run: "exit 1", skip: true }
"#
    .to_string()
}
