use crate::schema::documents;

use diesel::prelude::*;

/// Fila leída de `documents`. `body` es el JSON con los campos.
#[derive(Debug, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRow {
  pub id: String,
  pub collection: String,
  pub body: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow<'a> {
  pub collection: &'a str,
  pub id: &'a str,
  pub body: String,
}
