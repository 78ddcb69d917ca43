//! Models shared by the unit tests of this crate.

use keyform_types::Uuid;

use crate::decl::{CollectionShape, FieldDecl, FieldType, ModelDecl};
use crate::model::Model;

macro_rules! fixture_model {
    ($name:ident, $id:ty, $decl:expr) => {
        #[derive(Debug, Default)]
        pub struct $name {
            pub id: Option<$id>,
        }

        impl Model for $name {
            const NAME: &'static str = stringify!($name);
            type Id = $id;

            fn declaration() -> ModelDecl {
                $decl
            }

            fn id(&self) -> Option<&$id> {
                self.id.as_ref()
            }

            fn set_id(&mut self, id: Option<$id>) {
                self.id = id;
            }
        }
    };
}

fixture_model!(
    Country,
    i64,
    ModelDecl::new("Country")
        .field(FieldDecl::of::<i64>("id").id())
        .field(FieldDecl::of::<String>("name").attribute())
);

fixture_model!(
    Item,
    i64,
    ModelDecl::new("Item")
        .field(FieldDecl::of::<i64>("id").id())
        .field(FieldDecl::of::<String>("name").attribute())
        .field(FieldDecl::of::<f32>("price").attribute())
        .field(FieldDecl::of::<String>("label").attribute())
);

fixture_model!(
    Town,
    String,
    ModelDecl::new("Town")
        .field(FieldDecl::of::<String>("id").id())
        .field(FieldDecl::of::<String>("name").attribute())
);

fixture_model!(
    User,
    i64,
    ModelDecl::new("User")
        .field(FieldDecl::of::<i64>("id").id())
        .field(FieldDecl::of::<String>("name").attribute().indexed())
        .field(FieldDecl::of::<String>("room"))
        .field(FieldDecl::of::<i32>("age").attribute().indexed())
        .field(FieldDecl::of::<f32>("salary").attribute())
        .field(FieldDecl::of::<char>("initial").attribute())
        .field(FieldDecl::new("country", FieldType::model::<Country>()).reference().indexed())
        .field(collection("likes", CollectionShape::List).list_of::<Item>().indexed())
        .field(collection("purchases", CollectionShape::Set).set_of::<Item>())
        .field(collection("favorites", CollectionShape::Map).map_of::<i32, Item>())
        .field(
            collection("ordered", CollectionShape::SortedSet)
                .sorted_set_of::<Item>(Some("price")),
        )
        .field(collection("latest", CollectionShape::Array).array_of::<Item>(3))
);

fixture_model!(
    Distributor,
    Uuid,
    ModelDecl::new("Distributor")
        .field(FieldDecl::of::<Uuid>("id").id())
        .field(FieldDecl::of::<String>("name").attribute())
);

fixture_model!(
    Scored,
    i64,
    ModelDecl::new("Scored")
        .field(FieldDecl::of::<i64>("id").id())
        .field(collection("scores", CollectionShape::SortedSet).sorted_set_of::<f64>(None))
        .field(collection("tags", CollectionShape::Set).set_of::<String>())
);

fixture_model!(
    Admin,
    i64,
    ModelDecl::new("Admin")
        .extends::<Country>()
        .field(FieldDecl::of::<bool>("active").attribute())
);

pub fn collection(name: &'static str, shape: CollectionShape) -> FieldDecl {
    FieldDecl::new(name, FieldType::Collection(shape))
}

impl crate::decl::Describe for Item {
    fn describe() -> FieldType {
        FieldType::model::<Item>()
    }
}
