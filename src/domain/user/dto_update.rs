use super::User;

/// Partial update: every field is independently present or absent.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub password: Option<String>,
}

impl UpdateUserDto {
    /// Merge the present fields onto `user`. Absent fields leave the
    /// existing value untouched.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = Some(name);
        }
        if let Some(surname) = self.surname {
            user.surname = Some(surname);
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(salary) = self.salary {
            user.salary = Some(salary);
        }
        if let Some(password) = self.password {
            user.password = Some(password);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuditStamp;
    use chrono::Utc;

    fn existing() -> User {
        User {
            id: 1,
            name: Some("Mehmet".into()),
            surname: Some("Yilmaz".into()),
            email: "mehmet@example.com".into(),
            age: Some(30),
            salary: Some(60_000.0),
            password: Some("secret".into()),
            roles: Vec::new(),
            detached_roles: Vec::new(),
            audit: AuditStamp {
                created_at: Utc::now(),
                updated_at: Utc::now(),
                created_by: None,
                updated_by: None,
            },
        }
    }

    #[test]
    fn only_present_fields_change() {
        let mut user = existing();
        let before = user.clone();

        UpdateUserDto {
            age: Some(31),
            salary: Some(65_000.0),
            ..Default::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.age, Some(31));
        assert_eq!(user.salary, Some(65_000.0));
        assert_eq!(user.name, before.name);
        assert_eq!(user.surname, before.surname);
        assert_eq!(user.email, before.email);
        assert_eq!(user.password, before.password);
    }

    #[test]
    fn empty_update_is_identity() {
        let mut user = existing();
        let before = user.clone();
        UpdateUserDto::default().apply_to(&mut user);
        assert_eq!(user, before);
    }
}
