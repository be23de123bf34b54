use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub passed: bool }

#[derive(ToSchema)]
pub struct CreatedIdDoc { pub id: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct ErrorBodyDoc { pub statusCode: u16, pub message: String, pub error: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct GroupCreateDoc { pub name: String, pub startYear: i32 }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct GroupViewDoc { pub _id: String, pub name: String, pub startYear: i32 }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct AddressDoc { pub country: String, pub town: String, pub addressString: String }

/// `birthDate` is `YYYY-MM-DD`; full RFC 3339 timestamps are accepted on input.
#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentCreateDoc {
    pub name: String,
    pub surname: String,
    pub groupId: String,
    pub birthDate: String,
    pub phoneNumbers: Option<Vec<String>>,
    pub address: Option<AddressDoc>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentUpdateDoc {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub groupId: Option<String>,
    pub birthDate: Option<String>,
    pub phoneNumbers: Option<Vec<String>>,
    pub address: Option<AddressDoc>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentQueryDoc {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub groupId: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentInfoDoc { pub _id: String, pub name: String, pub surname: String, pub groupId: String, pub birthDate: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct StudentDetailsDoc {
    pub _id: String,
    pub name: String,
    pub surname: String,
    pub groupId: String,
    pub birthDate: String,
    pub phoneNumbers: Option<Vec<String>>,
    pub address: Option<AddressDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ping,
        crate::routes::groups::list,
        crate::routes::groups::create,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::list_by_group_id,
        crate::routes::students::search,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CreatedIdDoc,
            ErrorBodyDoc,
            GroupCreateDoc,
            GroupViewDoc,
            AddressDoc,
            StudentCreateDoc,
            StudentUpdateDoc,
            StudentQueryDoc,
            StudentInfoDoc,
            StudentDetailsDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "groups"),
        (name = "students")
    )
)]
pub struct ApiDoc;
