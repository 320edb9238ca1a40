use super::UserDraft;

#[derive(Debug, Clone, Default)]
pub struct CreateUserDto {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub password: Option<String>,
}

impl From<CreateUserDto> for UserDraft {
    fn from(dto: CreateUserDto) -> Self {
        Self {
            name: dto.name,
            surname: dto.surname,
            email: dto.email,
            age: dto.age,
            salary: dto.salary,
            password: dto.password,
            roles: Vec::new(),
        }
    }
}
