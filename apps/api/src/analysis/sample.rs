/// Demo resume offered to first-time users who have nothing to upload.
pub const SAMPLE_RESUME: &str = r#"Alex Morgan
Backend Engineer
Austin, TX | (512) 555-0142 | alex.morgan@example.com | github.com/alexmorgan

Summary
Backend engineer with 6 years of experience designing APIs and data pipelines in
Go and Python. Comfortable owning services from design review to on-call.

Skills
- Languages: Go, Python, SQL, Bash
- Data: PostgreSQL, Redis, Kafka, BigQuery
- Infrastructure: Docker, Kubernetes, Terraform, GitHub Actions
- Observability: Prometheus, Grafana, OpenTelemetry

Experience

Senior Backend Engineer | Lumen Freight | Austin, TX | 2021 - Present
- Worked on the shipment tracking API used by partner carriers.
- Migrated event ingestion from cron jobs to Kafka consumers, processing 4M events per day.
- Helped reduce infrastructure costs by moving batch jobs to spot instances.
- Mentored two junior engineers through their first on-call rotations.

Backend Engineer | Tallyworks | Remote | 2018 - 2021
- Built REST endpoints for the invoicing product in Python and Flask.
- Improved report generation speed.
- Wrote integration tests for the payments module, raising coverage from 35% to 80%.

Education
B.S. Computer Science, University of Texas at Austin, 2018

Projects
- rate-guard: open-source Go middleware for token-bucket rate limiting (400 GitHub stars).
"#;
