//! Static seed collections used when a store has no persisted snapshot.
//!
//! Mirrors the sample dataset bundled with the frontend, including the demo
//! head account `jsmith` / `jsmith2024` shown on the login page.

use crate::models::{
    Priority, Project, ProjectStatus, Task, TaskStatus, Team, User, UserRole,
};

pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            username: "jsmith".to_string(),
            password: "jsmith2024".to_string(),
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            user_type: UserRole::Head,
            team_id: Some(1),
            created_at: "2024-01-15T09:00:00Z".to_string(),
            updated_at: None,
        },
        User {
            id: 2,
            username: "mchen".to_string(),
            password: "mchen2024".to_string(),
            name: "Maria Chen".to_string(),
            email: "maria.chen@example.com".to_string(),
            user_type: UserRole::Employee,
            team_id: Some(1),
            created_at: "2024-01-18T10:30:00Z".to_string(),
            updated_at: None,
        },
        User {
            id: 3,
            username: "dpatel".to_string(),
            password: "dpatel2024".to_string(),
            name: "Dev Patel".to_string(),
            email: "dev.patel@example.com".to_string(),
            user_type: UserRole::Employee,
            team_id: Some(2),
            created_at: "2024-01-22T14:15:00Z".to_string(),
            updated_at: None,
        },
        User {
            id: 4,
            username: "lgarcia".to_string(),
            password: "lgarcia2024".to_string(),
            name: "Lucia Garcia".to_string(),
            email: "lucia.garcia@example.com".to_string(),
            user_type: UserRole::Employee,
            team_id: Some(3),
            created_at: "2024-02-01T08:45:00Z".to_string(),
            updated_at: None,
        },
    ]
}

pub fn teams() -> Vec<Team> {
    vec![
        Team {
            id: 1,
            name: "Platform".to_string(),
            description: "Core platform and infrastructure".to_string(),
        },
        Team {
            id: 2,
            name: "Mobile".to_string(),
            description: "iOS and Android applications".to_string(),
        },
        Team {
            id: 3,
            name: "Design".to_string(),
            description: "Product design and research".to_string(),
        },
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Redesign".to_string(),
            description: "<p>Refresh the marketing site with the new brand guidelines.</p>"
                .to_string(),
            team_id: 1,
            status: ProjectStatus::InProgress,
            priority: Priority::High,
            start_date: "2024-02-01".to_string(),
            end_date: "2024-05-31".to_string(),
            created_at: "2024-02-01T08:00:00Z".to_string(),
            updated_at: "2024-02-01T08:00:00Z".to_string(),
        },
        Project {
            id: 2,
            name: "Mobile App Launch".to_string(),
            description: "<p>Ship the first public release of the companion app.</p>".to_string(),
            team_id: 2,
            status: ProjectStatus::Planning,
            priority: Priority::Medium,
            start_date: "2024-03-15".to_string(),
            end_date: "2024-09-30".to_string(),
            created_at: "2024-02-10T11:20:00Z".to_string(),
            updated_at: "2024-02-10T11:20:00Z".to_string(),
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Draft new landing page".to_string(),
            description: "<p>First pass at the hero section and pricing table.</p>".to_string(),
            project_id: 1,
            assigned_to: 2,
            status: TaskStatus::Todo,
            priority: Priority::High,
            due_date: "2024-03-01".to_string(),
            created_at: "2024-02-05T09:30:00Z".to_string(),
            updated_at: "2024-02-05T09:30:00Z".to_string(),
        },
        Task {
            id: 2,
            title: "Migrate style guide".to_string(),
            description: "<p>Port the legacy style guide into the new component library.</p>"
                .to_string(),
            project_id: 1,
            assigned_to: 3,
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            due_date: "2024-03-15".to_string(),
            created_at: "2024-02-06T13:00:00Z".to_string(),
            updated_at: "2024-02-12T16:45:00Z".to_string(),
        },
        Task {
            id: 3,
            title: "Set up app store accounts".to_string(),
            description: "<p>Developer accounts and signing certificates for both stores.</p>"
                .to_string(),
            project_id: 2,
            assigned_to: 3,
            status: TaskStatus::Todo,
            priority: Priority::Low,
            due_date: "2024-04-01".to_string(),
            created_at: "2024-02-11T10:00:00Z".to_string(),
            updated_at: "2024-02-11T10:00:00Z".to_string(),
        },
        Task {
            id: 4,
            title: "Design onboarding flow".to_string(),
            description: "<p>Wireframes for the three-step onboarding.</p>".to_string(),
            project_id: 2,
            assigned_to: 4,
            status: TaskStatus::Completed,
            priority: Priority::Medium,
            due_date: "2024-02-20".to_string(),
            created_at: "2024-02-12T09:15:00Z".to_string(),
            updated_at: "2024-02-19T17:30:00Z".to_string(),
        },
    ]
}
