//! # Cartable API
//!
//! A backend-for-frontend for a small school platform, built with Rust and
//! Axum. Every durable concern is delegated to two external services: a
//! hosted auth/database provider (sessions, users, classes, courses, audit
//! trail) and a cloud file-storage provider (course material uploads).
//! Each endpoint verifies a JWT, forwards one or two calls to a provider,
//! and reshapes the response.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Per-concern configuration from environment
//! ├── drive/            # File-storage gateway (Ready|Disabled state)
//! ├── middleware/       # Token verification and role gates
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, student registration, password reset
//! │   ├── users/       # Admin user management + audit recorder
//! │   ├── classes/     # Class records and rosters
//! │   ├── cours/       # Teacher-scoped course CRUD
//! │   └── files/       # Upload and delete-by-id
//! ├── provider/         # Auth/database provider client
//! └── utils/            # Errors, JWT helpers
//! ```
//!
//! Each feature module follows a consistent structure: `controller.rs`
//! (HTTP handlers), `service.rs` (provider calls), `model.rs` (DTOs),
//! `router.rs` (route wiring).
//!
//! ## Roles
//!
//! | Role | Access |
//! |------|--------|
//! | admin | User management, class creation |
//! | enseignant | Course management, class creation |
//! | eleve | Read access to shared resources |
//!
//! Gates are set-membership checks: course routes accept exactly
//! `enseignant`, so an admin is rejected there.
//!
//! ## Ownership
//!
//! Mutations on teacher-owned rows are scoped in the provider query
//! itself (`enseignant_id = caller`); a mutation that matches nothing
//! returns 404 rather than touching another teacher's data.
//!
//! ## Environment
//!
//! ```bash
//! PROVIDER_URL=https://project.example.co
//! PROVIDER_SERVICE_KEY=service-role-key
//! JWT_SECRET=shared-signing-secret
//! GOOGLE_CLIENT_ID=...
//! GOOGLE_CLIENT_SECRET=...
//! GOOGLE_REFRESH_TOKEN=...
//! GOOGLE_DRIVE_FOLDER_ID=...
//! AUDIT_STRICT=false
//! ```
//!
//! With the server running, Swagger UI is served at `/swagger-ui`.

pub mod config;
pub mod docs;
pub mod drive;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod provider;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
