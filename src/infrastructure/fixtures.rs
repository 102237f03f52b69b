use uuid::Uuid;

use crate::domain::directory::{Project, Team, User};

/// Static collections behind the read-only dashboard routes. Generated
/// once at startup; ids are fresh per run, everything else is fixed.
#[derive(Debug, Clone)]
pub struct Directory {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub projects: Vec<Project>,
}

const USER_NAMES: [(&str, &str, u8); 5] = [
    ("Ada", "Lovelace", 36),
    ("Grace", "Hopper", 45),
    ("Alan", "Turing", 41),
    ("Edsger", "Dijkstra", 52),
    ("Barbara", "Liskov", 39),
];

const TEAM_NAMES: [(&str, &str); 3] = [
    ("HTTP", "Engineering"),
    ("SQL", "Data"),
    ("RSS", "Outdoors"),
];

const PROJECT_NAMES: [(&str, &str); 4] = [
    ("Ergonomic Steel Chair", "empower scalable e-markets"),
    ("Incredible Granite Towels", "streamline mission-critical channels"),
    ("Rustic Cotton Gloves", "synthesize cross-platform paradigms"),
    ("Sleek Wooden Keyboard", "leverage real-time architectures"),
];

impl Directory {
    pub fn generate() -> Self {
        let users: Vec<User> = USER_NAMES
            .iter()
            .map(|&(first, last, age)| {
                let user_name = format!("{}{}", &first[..1].to_lowercase(), last.to_lowercase());
                User {
                    id: Uuid::new_v4(),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: format!("{user_name}@example.com"),
                    avatar_url: format!("https://i.pravatar.cc/150?u={user_name}"),
                    user_name,
                    age,
                }
            })
            .collect();

        let user_ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let teams: Vec<Team> = TEAM_NAMES
            .iter()
            .enumerate()
            .map(|(i, &(name, department))| Team {
                id: Uuid::new_v4(),
                name: name.to_string(),
                department: department.to_string(),
                // Overlapping slices of the user list stand in for the
                // original's random membership draw.
                members: user_ids.iter().copied().skip(i).take(3).collect(),
            })
            .collect();

        let projects: Vec<Project> = PROJECT_NAMES
            .iter()
            .enumerate()
            .map(|(i, &(name, goal_statement))| Project {
                id: Uuid::new_v4(),
                name: name.to_string(),
                goal_statement: goal_statement.to_string(),
                team: teams[i % teams.len()].id,
            })
            .collect();

        Self { users, teams, projects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_expected_collection_sizes() {
        let dir = Directory::generate();
        assert_eq!(dir.users.len(), 5);
        assert_eq!(dir.teams.len(), 3);
        assert_eq!(dir.projects.len(), 4);
    }

    #[test]
    fn teams_reference_generated_users() {
        let dir = Directory::generate();
        for team in &dir.teams {
            assert!(!team.members.is_empty());
            for member in &team.members {
                assert!(dir.users.iter().any(|u| u.id == *member));
            }
        }
    }

    #[test]
    fn projects_reference_generated_teams() {
        let dir = Directory::generate();
        for project in &dir.projects {
            assert!(dir.teams.iter().any(|t| t.id == project.team));
        }
    }

    #[test]
    fn user_json_uses_camel_case_fields() {
        let dir = Directory::generate();
        let json = serde_json::to_value(&dir.users[0]).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("userName").is_some());
        assert!(json.get("avatarUrl").is_some());
        assert!(json.get("first_name").is_none());
    }
}
