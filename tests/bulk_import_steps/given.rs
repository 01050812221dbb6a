//! Given steps for bulk import BDD scenarios.

use super::world::BulkImportWorld;
use rstest_bdd_macros::given;

#[given(r#"an import line "{line}""#)]
fn import_line(world: &mut BulkImportWorld, line: String) {
    world.lines.push(line);
}
