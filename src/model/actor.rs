/// A person or group together with the roles they had.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Actor {
    /// The name as tagged.
    pub name: String,
    /// Roles such as `"producer"` or `"piano"`, without duplicates.
    pub roles: Vec<String>,
}

/// Actors in the order they were first mentioned. Each name appears once; repeated mentions add
/// roles to the existing entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorRoles {
    actors: Vec<Actor>,
}

impl ActorRoles {
    /// Creates an empty list.
    pub fn new() -> ActorRoles {
        ActorRoles::default()
    }

    /// Records `name` without a role, unless the name is already known.
    pub fn add_actor(&mut self, name: &str) {
        self.entry(name);
    }

    /// Associates `role` with `name`. Duplicate roles are ignored.
    pub fn add(&mut self, name: &str, role: &str) {
        let role = role.trim();
        let actor = self.entry(name);
        if !role.is_empty() && !actor.roles.iter().any(|r| r == role) {
            actor.roles.push(role.to_string());
        }
    }

    /// Looks up an actor by exact name.
    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name == name)
    }

    /// Iterates over the actors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Returns the number of distinct actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns true if no actor was recorded.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    fn entry(&mut self, name: &str) -> &mut Actor {
        let name = name.trim();
        let index = match self.actors.iter().position(|a| a.name == name) {
            Some(index) => index,
            None => {
                self.actors.push(Actor {
                    name: name.to_string(),
                    roles: Vec::new(),
                });
                self.actors.len() - 1
            }
        };
        &mut self.actors[index]
    }
}
