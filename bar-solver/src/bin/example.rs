//! Bar Solver Example - Fixed-Free Bar Under a Tip Load

use bar_solver::prelude::*;

fn main() {
    println!("=== Bar Solver Example: Fixed-Free Bar ===\n");

    //  |o----o----o----o----o  --> P
    //  N0   N1   N2   N3   N4
    //
    // Four unit elements, E = 10, A = 1, tip load P = 2
    let mut model = BarModel::uniform(4.0, 4);
    model
        .add_material(Material::elastic("Mat-1", 10.0, 0.3).expect("Invalid material"))
        .add_block(ElementBlock::new("Block-1", "Mat-1", BlockElements::all()))
        .add_boundary(BoundaryCondition::fixed(0))
        .add_cload(ConcentratedLoad::at_node(4, 2.0));

    let preprocessed = preprocess(&model).expect("Invalid model");

    println!("Running linear analysis...\n");
    let solution = bar_solver::analysis::solve(&preprocessed, &AnalysisOptions::default())
        .expect("Analysis failed");

    println!("Node Displacements:");
    for node in 0..model.num_node() {
        println!(
            "  N{}: x={:.2}, u={:.4}",
            node,
            model.coords[(node, 0)],
            solution.displacement(node, 0, model.dof_per_node())
        );
    }

    println!("\nGlobal Stiffness Matrix:");
    for row in solution.stiffness_rows() {
        let cells: Vec<String> = row.iter().map(|k| format!("{:7.2}", k)).collect();
        println!("  [{}]", cells.join(" "));
    }

    println!("\nSupport Reactions:");
    let reactions = solution.reactions();
    for (dof, _) in preprocessed.dofs.dirichlet() {
        println!("  dof {}: R={:.4}", dof, reactions[dof]);
    }

    println!("\nElement Forces:");
    for result in solution
        .element_results(&preprocessed)
        .expect("Missing material")
    {
        println!(
            "  E{}: strain={:.4}, stress={:.4}, N={:.4}",
            result.element, result.strain, result.stress, result.axial_force
        );
    }

    let summary = solution.summary();
    println!("\nSummary:");
    println!(
        "  Max displacement: {:.4} at dof {}",
        summary.max_displacement, summary.max_disp_dof
    );
    println!(
        "  Max reaction: {:.4} at dof {}",
        summary.max_reaction, summary.max_reaction_dof
    );

    println!("\n=== Analysis Complete ===");
}
